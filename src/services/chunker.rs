//! Column grouping for grid display.

/// Splits `items` into at most `columns` groups of up to `max_per_column`
/// items each, preserving order.
///
/// Items that do not fit are dropped; the caller only ever shows the first
/// `max_per_column * columns` items. A zero group size or zero columns yields
/// no groups.
pub fn chunk_into_columns<T>(items: &[T], max_per_column: usize, columns: usize) -> Vec<&[T]> {
    if max_per_column == 0 {
        return Vec::new();
    }

    items.chunks(max_per_column).take(columns).collect()
}
