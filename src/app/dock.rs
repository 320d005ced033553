use leptos::{ev, html, prelude::*};
use leptos_use::use_event_listener;
use log::{error, trace};

use crate::dock::dock_apps;
use crate::motion::center_offset;

#[component]
pub fn Dock() -> impl IntoView {
    let apps = dock_apps().unwrap_or_else(|e| {
        error!("Couldn't load dock apps: {e}");
        Vec::new()
    });
    let dock_ref = NodeRef::<html::Div>::new();
    let icon_refs = apps
        .iter()
        .map(|_| NodeRef::<html::Button>::new())
        .collect::<Vec<_>>();

    // TODO - scale icons by proximity once the centers are wired to a style
    let measured = icon_refs.clone();
    let _ = use_event_listener(dock_ref, ev::mousemove, move |_: ev::MouseEvent| {
        let dock = if let Some(dock) = dock_ref.get_untracked() {
            dock
        } else {
            return;
        };
        let left = dock.get_bounding_client_rect().left();
        let centers = measured
            .iter()
            .filter_map(|icon| icon.get_untracked())
            .map(|icon| {
                let rect = icon.get_bounding_client_rect();
                center_offset(left, rect.left(), rect.width())
            })
            .collect::<Vec<_>>();
        trace!("dock icon centers: {centers:?}");
    });

    view! {
        <section id="dock">
            <div node_ref=dock_ref class="dock-container">
                {apps
                    .into_iter()
                    .zip(icon_refs)
                    .map(|(app, icon_ref)| {
                        let src = app.icon_src();
                        let img_class = if app.can_open { "" } else { "opacity-60" };
                        view! {
                            <div class="relative flex justify-center">
                                <button
                                    node_ref=icon_ref
                                    type="button"
                                    class="dock-icon"
                                    data-app-id=app.id
                                    aria-label=app.name.clone()
                                    disabled=!app.can_open
                                >
                                    <img src=src alt=app.name loading="lazy" class=img_class />
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
