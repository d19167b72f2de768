//! Author credits: hyperlinked contributor names joined into a sentence.

use crate::book::{Contributor, KeyedTable};
use crate::utils::html::{escape, escape_attr};
use crate::xref::XrefError;

/// Render contributors as `A`, `A and B` or `A, B, and C`.
pub fn render_authors<S: AsRef<str>>(
    contributors: &KeyedTable<Contributor>,
    ids: &[S],
) -> Result<String, XrefError> {
    let names = ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            contributors
                .get(id)
                .map(author_link)
                .ok_or_else(|| XrefError::UnknownContributor { id: id.to_string() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(to_sentence(&names, "and"))
}

fn author_link(person: &Contributor) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape_attr(&person.profile_url()),
        escape(&person.display_name())
    )
}

/// Join items the way English lists are written (serial comma for 3+).
pub fn to_sentence(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [init @ .., last] => format!("{}, {conjunction} {last}", init.join(", ")),
    }
}
