use scraper::ElementRef;

/// Every text node below `element` in document order, trimmed, with the ones
/// that were only whitespace dropped.
pub fn stripped_strings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.text().map(str::trim).filter(|text| !text.is_empty())
}

/// `true` when the cell is a bare row number: non-empty, ASCII digits only.
/// Digits from other scripts, like `١٢`, do not count.
pub fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}
