use super::{escape, layout};
use crate::extractors::Notice;
use crate::model::{Thing, ThingAttrs, ValidationErrors};
use std::fmt::Write;

const TITLE: &str = "Things";

/// Values shown in the new/edit form. `id` is set when editing.
#[derive(Clone, Debug, Default)]
pub struct ThingForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl ThingForm {
    pub fn new_record(attrs: &ThingAttrs) -> Self {
        ThingForm {
            id: None,
            name: attrs.name.clone(),
            description: attrs.description.clone().unwrap_or_default(),
        }
    }

    pub fn existing(id: i64, attrs: &ThingAttrs) -> Self {
        ThingForm {
            id: Some(id),
            ..Self::new_record(attrs)
        }
    }
}

pub fn thing_path(id: i64) -> String {
    format!("/things/{}", id)
}

pub fn index(things: &[Thing], notice: Option<Notice>) -> String {
    let mut rows = String::new();
    for t in things {
        let path = thing_path(t.id);
        let _ = write!(
            rows,
            "<tr>\n<td>{}</td>\n<td>{}</td>\n<td><a href=\"{}\">Show</a></td>\n<td><a href=\"{}/edit\">Edit</a></td>\n<td>{}</td>\n</tr>\n",
            escape(&t.name),
            escape(t.description.as_deref().unwrap_or("")),
            path,
            path,
            destroy_button(t.id)
        );
    }
    let body = format!(
        "<h1>Listing things</h1>\n<table>\n<thead>\n<tr>\n<th>Name</th>\n<th>Description</th>\n<th colspan=\"3\"></th>\n</tr>\n</thead>\n<tbody>\n{}</tbody>\n</table>\n<br>\n<a href=\"/things/new\">New Thing</a>\n",
        rows
    );
    layout(TITLE, notice, &body)
}

pub fn show(thing: &Thing, notice: Option<Notice>) -> String {
    let body = format!(
        "<p>\n<strong>Name:</strong>\n{}\n</p>\n<p>\n<strong>Description:</strong>\n{}\n</p>\n<a href=\"{}/edit\">Edit</a> |\n<a href=\"/things\">Back</a>\n",
        escape(&thing.name),
        escape(thing.description.as_deref().unwrap_or("")),
        thing_path(thing.id)
    );
    layout(TITLE, notice, &body)
}

pub fn new(form: &ThingForm, errors: &ValidationErrors) -> String {
    let body = format!(
        "<h1>New thing</h1>\n{}<a href=\"/things\">Back</a>\n",
        form_partial(form, errors)
    );
    layout(TITLE, None, &body)
}

pub fn edit(form: &ThingForm, errors: &ValidationErrors) -> String {
    let show_link = form
        .id
        .map(|id| format!("<a href=\"{}\">Show</a> |\n", thing_path(id)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Editing thing</h1>\n{}{}<a href=\"/things\">Back</a>\n",
        form_partial(form, errors),
        show_link
    );
    layout(TITLE, None, &body)
}

/// Shared create/edit form. Edits POST with `_method=patch`.
fn form_partial(form: &ThingForm, errors: &ValidationErrors) -> String {
    let (action, method_field, submit) = match form.id {
        Some(id) => (
            thing_path(id),
            "<input type=\"hidden\" name=\"_method\" value=\"patch\">\n",
            "Update Thing",
        ),
        None => ("/things".to_string(), "", "Create Thing"),
    };
    format!(
        "<form action=\"{}\" method=\"post\">\n{}{}<div class=\"field\">\n<label for=\"thing_name\">Name</label><br>\n<input type=\"text\" id=\"thing_name\" name=\"thing[name]\" value=\"{}\">\n</div>\n<div class=\"field\">\n<label for=\"thing_description\">Description</label><br>\n<textarea id=\"thing_description\" name=\"thing[description]\">{}</textarea>\n</div>\n<div class=\"actions\">\n<input type=\"submit\" name=\"commit\" value=\"{}\">\n</div>\n</form>\n",
        action,
        method_field,
        error_messages(errors),
        escape(&form.name),
        escape(&form.description),
        submit
    )
}

/// Error-list partial; empty when there is nothing to report.
pub fn error_messages(errors: &ValidationErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let noun = if errors.len() == 1 { "error" } else { "errors" };
    let mut items = String::new();
    for msg in errors.full_messages() {
        let _ = writeln!(items, "<li>{}</li>", escape(&msg));
    }
    format!(
        "<div id=\"error_explanation\">\n<h2>{} {} prohibited this thing from being saved:</h2>\n<ul>\n{}</ul>\n</div>\n",
        errors.len(),
        noun,
        items
    )
}

fn destroy_button(id: i64) -> String {
    format!(
        "<form action=\"{}\" method=\"post\"><input type=\"hidden\" name=\"_method\" value=\"delete\"><input type=\"submit\" value=\"Destroy\"></form>",
        thing_path(id)
    )
}
