// crates/regnorm-core/src/traits.rs
use crate::error::Result;
use crate::table::Cell;
use crate::text::clean;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes case-, punctuation- and alphabet-insensitive
/// comparisons based on [`clean`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`] (and optionally their
/// aliases), and get convenient helpers:
/// - [`NameMatch::is_named`]: equality on the cleaned form
/// - [`NameMatch::name_contains`]: substring match on the cleaned form
///
/// # Examples
/// ```rust
/// use regnorm_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Санкт-Петербург").is_named("санкт петербург"));
/// assert!(Place("Mосковская область").name_contains("московская"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Additional names that count as the same place.
    fn alias_strs(&self) -> &[String] {
        &[]
    }

    /// Returns `true` if `q` equals the canonical name or an alias after
    /// cleaning both sides with [`clean`].
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        let q = clean(q);
        if q.is_empty() {
            return false;
        }
        clean(self.name_str()) == q || self.alias_strs().iter().any(|a| clean(a) == q)
    }

    /// Substring match of the cleaned `q` inside the cleaned canonical name.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        clean(self.name_str()).contains(&clean(q))
    }
}

/// The table contract used by the batch matcher and the field attacher.
///
/// A table is column-addressable and preserves row order. Operations that add
/// a column consume the table and hand back the extended value; they never
/// reorder rows.
pub trait Tabular: Sized {
    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Text view of every row's value in `column`, in row order.
    ///
    /// Missing cells come back as `None`; numeric cells as their decimal text.
    fn text_column(&self, column: &str) -> Result<Vec<Option<String>>>;

    /// Appends `values` as a column called `name`, replacing an existing
    /// column with the same name. `values` must hold one cell per row.
    fn with_column(self, name: &str, values: Vec<Cell>) -> Result<Self>;
}
