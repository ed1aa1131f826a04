use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC3986 unreserved bytes.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Resolves a resource path template by replacing `{key}` placeholders with
/// percent-encoded values.
///
/// Placeholders with no matching variable remain unchanged.
///
/// # Examples
/// ```
/// use logicapp_util::http::build_path;
///
/// let path = build_path(
///     "/subscriptions/{subscription}/resourceGroups/{group}",
///     &[("subscription", "0000"), ("group", "my group")],
/// );
/// assert_eq!(path, "/subscriptions/0000/resourceGroups/my%20group");
/// ```
pub fn build_path(template: &str, variables: &[(&str, &str)]) -> String {
    let mut path = template.to_string();
    for (key, value) in variables {
        let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
        path = path.replace(&format!("{{{}}}", key), &encoded);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::build_path;

    #[test]
    fn build_path_preserves_unreserved_identifier_bytes() {
        let path = build_path("/resourceGroups/{group}", &[("group", "rg-1.prod_a~b")]);
        assert_eq!(path, "/resourceGroups/rg-1.prod_a~b");
    }

    #[test]
    fn build_path_encodes_reserved_bytes_for_placeholder_values() {
        let path = build_path("/workflows/{name}", &[("name", "team/app name")]);
        assert_eq!(path, "/workflows/team%2Fapp%20name");
    }

    #[test]
    fn build_path_leaves_unknown_placeholders() {
        let path = build_path("/a/{known}/b/{missing}", &[("known", "x")]);
        assert_eq!(path, "/a/x/b/{missing}");
    }
}
