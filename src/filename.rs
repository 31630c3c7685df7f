use crate::content::DocumentKind;
use chrono::NaiveDate;

/// `{kind}-{slug(title)}-{YYYY-MM-DD}.pdf`. A title with nothing to slug
/// becomes `untitled`.
pub fn export_filename(kind: DocumentKind, title: &str, date: NaiveDate) -> String {
    let mut slug = slug::slugify(title);
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    format!("{}-{}-{}.pdf", kind, slug, date.format("%Y-%m-%d"))
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
