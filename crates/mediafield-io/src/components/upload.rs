//! Media upload field with drag-and-drop, file picker, and preview.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use gloo_timers::future::TimeoutFuture;
use mediafield_core::{FieldConfig, FieldState, FileMeta, FormStore, PreviewError};

use crate::components::MediaSurface;
use crate::picker::BrowserPicker;

/// Props for the [`MediaUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MediaUploadProps {
    /// Field name, label, media kind, mode, and any existing value.
    /// Read once, when the field is created.
    config: FieldConfig,
    /// The host form the field registers with and writes to.
    form: Signal<FormStore>,
}

/// A single image or video upload field.
///
/// Accepts a file by drag-and-drop onto the zone or through the file
/// picker, shows a live preview, and offers Remove / Change File while
/// editable. The picker only opens from explicit click targets (the
/// empty-state prompt, the preview, and "Change File"); the drop zone
/// itself does not open it.
#[component]
pub fn MediaUpload(props: MediaUploadProps) -> Element {
    let mut form = props.form;
    let mut field = use_signal({
        let config = props.config.clone();
        move || FieldState::new(config)
    });
    let picker = use_hook(|| BrowserPicker::for_field(&props.config.name));

    // Register with the host form once the field is mounted.
    use_effect(move || {
        field.write().mount(&mut *form.write());
    });

    let open_picker = use_callback({
        let picker = picker.clone();
        move |()| {
            if let Err(e) = field.write().open(&picker) {
                tracing::debug!(error = %e, "file picker not opened");
            }
        }
    });

    // Filter, read, and commit the first file from a list.
    //
    // Shared by the picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths. The read runs in the background; the
    // field discards the result if another capture or a remove
    // happened in the meantime.
    let process_files = move |files: Vec<FileData>| async move {
        let metas = files.iter().map(|f| {
            let meta = FileMeta::new(f.name());
            match f.content_type() {
                Some(mime) => meta.with_mime(mime),
                None => meta,
            }
        });
        let Some(pending) = field.write().begin_capture(metas) else {
            return;
        };
        let Some(file) = files.into_iter().next() else {
            return;
        };

        let read = file
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| PreviewError::Read(e.to_string()));

        // Yield so the browser can paint before the encode runs.
        TimeoutFuture::new(0).await;

        let outcome = field
            .write()
            .complete_capture(pending, read, &mut *form.write());
        tracing::debug!(?outcome, "capture finished");
    };

    let handle_files = move |evt: FormEvent| {
        let picker = picker.clone();
        async move {
            process_files(evt.files()).await;
            picker.reset();
        }
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        if field.peek().accepts_drops() {
            process_files(evt.files()).await;
        }
    };

    let state = field.read();
    let label = state.config().label.clone();
    let kind = state.kind();
    let input_id = crate::picker::input_id(state.name());
    let accept = state.capture().policy().input_accept();
    let read_only = state.is_read_only();
    let preview = state.selection().preview().map(str::to_owned);
    let show_actions = state.show_actions();
    let show_marker = state.show_required_marker();
    let drag_active = state.is_drag_active();
    let notice = state.notice().map(ToString::to_string);
    let prompt = state.prompt();
    let error = state.error_message(&*form.read());
    drop(state);

    let zone_class = if drag_active {
        "border-[var(--border-accent)] bg-[var(--surface-active)]"
    } else {
        "border-[var(--border-muted)] bg-[var(--surface)]"
    };
    let pointer = if read_only { "" } else { "cursor-pointer" };

    rsx! {
        div { class: "flex flex-col space-y-2",
            label { class: "text-sm text-[var(--text)]", r#for: "{input_id}",
                "{label} "
                if show_marker {
                    sup { class: "text-[var(--text-error)]", "*" }
                }
            }

            div {
                class: "flex min-h-[250px] items-center justify-center rounded-md border-2 border-dotted transition-colors {zone_class}",
                ondragover: move |evt| {
                    // View-only fields keep the browser's no-drop cursor.
                    if !field.peek().accepts_drops() {
                        return;
                    }
                    evt.prevent_default();
                    if !field.peek().is_drag_active() {
                        field.write().drag_enter();
                    }
                },
                ondragleave: move |_| {
                    field.write().drag_leave();
                },
                ondrop: handle_drop,

                input {
                    id: "{input_id}",
                    r#type: "file",
                    accept: "{accept}",
                    class: "hidden",
                    disabled: read_only,
                    onchange: handle_files,
                }

                if let Some(source) = preview {
                    div { class: "flex w-full flex-col p-6",
                        div {
                            class: "{pointer}",
                            onclick: move |_| open_picker.call(()),
                            MediaSurface { kind: kind, source: source.clone() }
                        }

                        if show_actions {
                            div { class: "flex gap-4 mt-3",
                                button {
                                    r#type: "button",
                                    class: "text-[var(--muted)] underline",
                                    onclick: move |_| {
                                        if let Err(e) = field.write().remove(&mut *form.write()) {
                                            tracing::debug!(error = %e, "remove ignored");
                                        }
                                    },
                                    "Remove"
                                }
                                button {
                                    r#type: "button",
                                    class: "text-[var(--text-accent)] underline",
                                    onclick: move |_| open_picker.call(()),
                                    "Change File"
                                }
                            }
                        }
                    }
                } else {
                    div {
                        class: "flex w-full flex-col items-center p-6 {pointer}",
                        onclick: move |_| open_picker.call(()),
                        div { class: "grid aspect-square w-14 place-items-center rounded-full bg-[var(--surface-active)]",
                            Icon { width: 24, height: 24, icon: LdUpload }
                        }
                        p { class: "mt-2 max-w-[200px] text-center text-sm text-[var(--text-secondary)]",
                            "{prompt} "
                            span { class: "font-semibold text-[var(--text-accent)]", "Browse" }
                        }
                        ul { class: "mt-10 flex list-disc justify-between space-x-12 text-center text-xs text-[var(--text-secondary)]",
                            li { "Aspect ratio 16:9" }
                            li { "Recommended size: 1024x576" }
                        }
                    }
                }
            }

            if let Some(ref notice) = notice {
                p { class: "ml-2 text-xs text-[var(--text-error)]", "{notice}" }
            }

            if let Some(ref error) = error {
                span { class: "ml-2 text-xs tracking-wide text-[var(--text-error)]", "{error}" }
            }
        }
    }
}
