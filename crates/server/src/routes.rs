/// Scalar parameters pulled out of a `{color}-{width}-{height}[-{x}].png` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParts<'a> {
    pub color: &'a str,
    pub width: &'a str,
    pub height: &'a str,
    pub cross: Option<&'a str>,
}

/// Split a file segment into its parts, or `None` when no route shape matches.
///
/// With four or more dash-separated parts the last three are width, height
/// and the cross marker, and everything before them is the color. The marker
/// must be non-empty; a trailing dash stays part of the height.
pub fn parse_file(file: &str) -> Option<FileParts<'_>> {
    let stem = file.strip_suffix(".png")?;
    let parts: Vec<&str> = stem.rsplitn(4, '-').collect();
    match *parts.as_slice() {
        [height, width, color] => Some(FileParts {
            color,
            width,
            height,
            cross: None,
        }),
        ["", height, width, color] => Some(FileParts {
            color,
            width,
            height: &stem[stem.len() - height.len() - 1..],
            cross: None,
        }),
        [x, height, width, color] => Some(FileParts {
            color,
            width,
            height,
            cross: Some(x),
        }),
        _ => None,
    }
}

/// Empty path pieces count as missing.
pub fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
