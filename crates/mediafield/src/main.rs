mod course;

use dioxus::prelude::*;
use mediafield_core::FormStore;
use mediafield_io::MediaUpload;

use course::{CourseSnapshot, FormMode};

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app);
}

/// Root application component.
///
/// Holds the host form and the stored course snapshot, and renders the
/// thumbnail and video upload fields for the selected mode.
fn app() -> Element {
    // --- Application state ---
    let course = use_hook(|| {
        CourseSnapshot::from_json(include_str!("../assets/course.json")).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "bundled course snapshot is invalid, starting empty");
            CourseSnapshot::default()
        })
    });
    let mut mode = use_signal(|| FormMode::Add);
    let mut form = use_signal(FormStore::new);
    let mut status = use_signal(|| Option::<String>::None);

    // --- Save handler ---
    // Runs the host form's validation; fields show their own
    // "is required" message when flagged.
    let on_save = move |_| {
        let valid = form.write().validate();
        if valid {
            let summary = course::summarize(&form.read());
            tracing::info!(%summary, "form submitted");
            status.set(Some(summary));
        } else {
            status.set(Some("Please provide the required media".to_owned()));
        }
    };

    let [thumbnail, video] = course::field_configs(mode(), &course);
    let read_only = mode() == FormMode::View;
    let thumbnail_key = format!("{}-{}", mode(), thumbnail.name);
    let video_key = format!("{}-{}", mode(), video.name);
    let course_name = course.name.clone();

    // --- Layout ---
    rsx! {
        div { class: "min-h-screen bg-(--bg) text-(--text) flex flex-col",
            header { class: "px-6 py-4 border-b border-(--border)",
                h1 { class: "text-2xl", "Course media" }
                p { class: "text-(--muted) text-sm", "{course_name}" }
            }

            div { class: "flex gap-2 px-6 pt-4",
                for m in FormMode::ALL {
                    button {
                        key: "{m}",
                        r#type: "button",
                        class: if m == mode() { "px-3 py-1 rounded bg-[var(--btn-primary)] text-white" } else { "px-3 py-1 rounded bg-[var(--surface)]" },
                        onclick: move |_| {
                            // Fresh form per mode so registrations and values
                            // from the previous mode do not linger.
                            form.set(FormStore::new());
                            status.set(None);
                            mode.set(m);
                        },
                        "{m}"
                    }
                }
            }

            form {
                class: "flex flex-col gap-6 p-6 max-w-2xl",
                onsubmit: move |evt| evt.prevent_default(),

                // Keyed by mode so each mode starts from fresh field state.
                MediaUpload { key: "{thumbnail_key}", config: thumbnail, form: form }
                MediaUpload { key: "{video_key}", config: video, form: form }

                if !read_only {
                    button {
                        r#type: "button",
                        class: "self-start px-4 py-2 bg-[var(--btn-primary)] hover:bg-[var(--btn-primary-hover)] rounded text-white font-medium transition-colors cursor-pointer",
                        onclick: on_save,
                        "Save"
                    }
                }

                if let Some(ref msg) = status() {
                    p { class: "text-sm text-(--text-secondary)", "{msg}" }
                }
            }
        }
    }
}
