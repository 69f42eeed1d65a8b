pub mod html;
pub mod json;
pub mod text;

use ini_diff::FieldChange;

pub(crate) const UNSET: &str = "<unset>";

pub(crate) fn field_value(value: Option<&String>) -> &str {
    value.map(String::as_str).unwrap_or(UNSET)
}

pub(crate) fn change_values(change: &FieldChange) -> (&str, &str) {
    (
        field_value(change.value_a.as_ref()),
        field_value(change.value_b.as_ref()),
    )
}
