//! Documents tab: download links with size and modification date.

use chrono::NaiveDateTime;

use crate::{
    api::Document,
    state::Tab,
    ui::{
        fragment::Fragment,
        utils::{escape_html, format_date, format_file_size},
    },
};

/// Renders the documents list.
///
/// Documents are plain links, so the fragment wires no actions.
///
/// # Arguments
///
/// * `documents` - Current document snapshot.
/// * `now` - Reference time for relative dates.
#[must_use]
pub fn render(documents: &[Document], now: NaiveDateTime) -> Fragment {
    if documents.is_empty() {
        return Fragment {
            tab: Tab::Documents,
            html: r#"<div class="py-10 text-center text-gray-500 text-lg">No documents found</div>"#
                .to_string(),
            actions: Vec::new(),
        };
    }

    let html = documents
        .iter()
        .map(|document| {
            format!(
                concat!(
                    r#"<a href="{url}" target="_blank" class="document-item block rounded-xl p-4 mb-3">"#,
                    r#"<div class="flex items-center gap-3">"#,
                    r#"<i data-lucide="file-text" class="w-6 h-6"></i>"#,
                    r#"<div class="flex-1 min-w-0">"#,
                    r#"<div class="font-bold truncate">{filename}</div>"#,
                    r#"<div class="flex gap-3 text-xs"><span>{size}</span><span>{modified}</span></div>"#,
                    "</div>",
                    r#"<i data-lucide="download" class="w-5 h-5"></i>"#,
                    "</div></a>"
                ),
                url = escape_html(&document.url),
                filename = escape_html(&document.filename),
                size = format_file_size(document.size),
                modified = escape_html(&format_date(document.modified.as_deref(), now)),
            )
        })
        .collect();

    Fragment {
        tab: Tab::Documents,
        html,
        actions: Vec::new(),
    }
}
