//! Pictures tab: a thumbnail grid, each tile opening the image viewer.

use crate::{
    api::Picture,
    state::Tab,
    ui::{
        fragment::{Action, Fragment},
        utils::escape_html,
    },
};

/// Renders the pictures grid.
#[must_use]
pub fn render(pictures: &[Picture]) -> Fragment {
    if pictures.is_empty() {
        return Fragment {
            tab: Tab::Pictures,
            html: r#"<div class="col-span-full py-10 text-center text-gray-500 text-lg">No pictures found</div>"#
                .to_string(),
            actions: Vec::new(),
        };
    }

    let mut html = String::new();
    let mut actions = Vec::with_capacity(pictures.len());

    for (index, picture) in pictures.iter().enumerate() {
        let open = Action::ShowImage(index);
        actions.push(open);

        let title = escape_html(&picture.title);
        html.push_str(&format!(
            concat!(
                r#"<div class="picture-tile rounded-xl overflow-hidden cursor-pointer aspect-square relative group" {attrs}>"#,
                r#"<img src="{thumbnail}" alt="{title}" loading="lazy" class="w-full h-full object-cover">"#,
                r#"<div class="picture-caption"><div class="text-white text-sm font-semibold truncate">{title}</div></div>"#,
                "</div>"
            ),
            attrs = open.data_attributes(),
            thumbnail = escape_html(&picture.thumbnail_url),
            title = title,
        ));
    }

    Fragment {
        tab: Tab::Pictures,
        html,
        actions,
    }
}
