mod directory;
mod file;
mod headers;

pub(crate) use directory::render_directory;
pub(crate) use file::render_file;

#[cfg(test)]
pub(crate) use directory::{escape_html, render_listing};
#[cfg(test)]
pub(crate) use file::content_type_for;
