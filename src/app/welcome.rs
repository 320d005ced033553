use leptos::{ev, html, html::ElementType, prelude::*};
use leptos_use::{
    use_event_listener, use_raf_fn_with_options, utils::Pausable, UseRafFnCallbackArgs,
    UseRafFnOptions,
};
use log::debug;
use wasm_bindgen::JsCast;

use crate::motion::{center_offset, glyph_chars, GlyphStyle, TextHover, TextRole};

const DEFAULT_BASE_WEIGHT: f64 = 400.0;

#[component]
pub fn Welcome() -> impl IntoView {
    let subtitle_ref = NodeRef::<html::P>::new();
    let title_ref = NodeRef::<html::H1>::new();

    view! {
        <section id="welcome">
            <p node_ref=subtitle_ref>
                <HoverText
                    container=subtitle_ref
                    text="Hey, I'm Parth! Welcome to My"
                    role=TextRole::Subtitle
                    class="text-3xl font-georama"
                    base_weight=100.0
                />
            </p>
            <h1 node_ref=title_ref class="mt-7">
                <HoverText
                    container=title_ref
                    text="Portfolio"
                    role=TextRole::Title
                    class="text-9xl italic font-georama"
                />
            </h1>
            <div class="small-screen">
                <p>"This Portfolio is designed for desktop/tabled screens only."</p>
            </div>
        </section>
    }
}

/// Letters that lift, tilt and glow as the pointer passes over `container`.
///
/// Renders only the glyph spans; the caller owns the element they sit in, and
/// that element's whole box is the hover area.
#[component]
pub fn HoverText<E>(
    container: NodeRef<E>,
    text: &'static str,
    role: TextRole,
    class: &'static str,
    #[prop(default = DEFAULT_BASE_WEIGHT)] base_weight: f64,
) -> impl IntoView
where
    E: ElementType + Clone + 'static,
    E::Output: JsCast + Clone + AsRef<web_sys::Element> + Into<web_sys::EventTarget> + 'static,
{
    let glyphs = glyph_chars(text);
    let glyph_refs = glyphs
        .iter()
        .map(|_| NodeRef::<html::Span>::new())
        .collect::<Vec<_>>();
    let styles = glyphs
        .iter()
        .map(|_| RwSignal::new(GlyphStyle::at_weight(base_weight)))
        .collect::<Vec<_>>();
    let hover = StoredValue::new(TextHover::new(role, glyphs.len(), base_weight));

    // frames only run between a pointer event and the moment every glyph settles
    let settled = ArcTrigger::new();
    let frame_styles = styles.clone();
    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        {
            let settled = settled.clone();
            move |args: UseRafFnCallbackArgs| {
                let frame = hover
                    .try_update_value(|h| h.frame(args.timestamp / 1000.0))
                    .flatten();
                match frame {
                    Some(frame) => {
                        for (style, next) in frame_styles.iter().zip(frame) {
                            style.set(next);
                        }
                    }
                    None => settled.notify(),
                }
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    Effect::watch(move || settled.track(), move |_, _, _| pause(), false);

    let measured = glyph_refs.clone();
    Effect::new(move |_| {
        if let Some(teardown) = setup_text_hover(container, measured.clone(), hover, resume.clone())
        {
            on_cleanup(teardown);
        }
    });

    glyphs
        .into_iter()
        .zip(glyph_refs)
        .zip(styles)
        .map(|((c, glyph_ref), glyph_style)| {
            view! {
                <span node_ref=glyph_ref class=class style=move || glyph_style.get().css()>
                    {c.to_string()}
                </span>
            }
        })
        .collect_view()
}

/// Attaches pointer handlers to `container` and returns the teardown that
/// removes them. Does nothing while the container isn't mounted.
///
/// Glyph positions are measured from live layout on every move so reflows
/// are picked up without any invalidation. `wake` restarts the frame loop.
fn setup_text_hover<E, W>(
    container: NodeRef<E>,
    glyphs: Vec<NodeRef<html::Span>>,
    hover: StoredValue<TextHover>,
    wake: W,
) -> Option<impl Fn() + Clone + Send + Sync>
where
    E: ElementType + Clone + 'static,
    E::Output: JsCast + Clone + AsRef<web_sys::Element> + Into<web_sys::EventTarget> + 'static,
    W: Fn() + Clone + 'static,
{
    if container.get().is_none() {
        return None;
    }

    let wake_on_move = wake.clone();
    let on_move = use_event_listener(container, ev::mousemove, move |ev: ev::MouseEvent| {
        let el = if let Some(el) = container.get_untracked() {
            el
        } else {
            return;
        };
        let el: &web_sys::Element = el.as_ref();
        let container_left = el.get_bounding_client_rect().left();
        let pointer_x = f64::from(ev.client_x()) - container_left;
        let centers = glyphs
            .iter()
            .map(|glyph| {
                glyph.get_untracked().map(|glyph| {
                    let rect = glyph.get_bounding_client_rect();
                    center_offset(container_left, rect.left(), rect.width())
                })
            })
            .collect::<Vec<_>>();
        hover.try_update_value(|h| h.pointer_move(pointer_x, &centers, ev.time_stamp() / 1000.0));
        wake_on_move();
    });

    let on_leave = use_event_listener(container, ev::mouseleave, move |ev: ev::MouseEvent| {
        hover.try_update_value(|h| h.pointer_leave(ev.time_stamp() / 1000.0));
        wake();
    });

    let (role, len) = hover.with_value(|h| (h.role(), h.len()));
    hover.update_value(TextHover::attach);
    debug!("hover attached: {role:?}, {len} glyphs");

    Some(move || {
        on_move();
        on_leave();
        hover.try_update_value(TextHover::detach);
        debug!("hover detached: {role:?}");
    })
}
