//! Media rendering surface: static image or playable video.

use dioxus::prelude::*;
use mediafield_core::MediaKind;

/// Props for the [`MediaSurface`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MediaSurfaceProps {
    /// Chooses between `<img>` and `<video>`.
    kind: MediaKind,
    /// URL or data URI to display.
    source: String,
}

/// Renders a preview source at a fixed 16:9 aspect ratio.
///
/// Purely presentational; nothing flows back to the field.
#[component]
pub fn MediaSurface(props: MediaSurfaceProps) -> Element {
    let source = props.source;

    rsx! {
        match props.kind {
            MediaKind::Image => rsx! {
                img {
                    src: "{source}",
                    alt: "Preview",
                    class: "w-full aspect-video rounded-md object-cover",
                }
            },
            MediaKind::Video => rsx! {
                video {
                    src: "{source}",
                    class: "w-full aspect-video rounded-md bg-black",
                    controls: true,
                    "playsinline": "true",
                }
            },
        }
    }
}
