//! Calendar helpers and gap filling for bucketed series.

use time::util::is_leap_year;

use crate::Error;

/// The number of days in `month` of `year`.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, Error> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(Error::InvalidMonth(month)),
    }
}

/// Check that `month` is in 1..=12.
///
/// # Errors
/// Returns [Error::InvalidMonth] otherwise.
pub fn validate_month(month: u8) -> Result<u8, Error> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(Error::InvalidMonth(month))
    }
}

/// Check that `year` is in 1..=9999.
///
/// # Errors
/// Returns [Error::InvalidYear] otherwise.
pub fn validate_year(year: i32) -> Result<i32, Error> {
    if (1..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidYear(year))
    }
}

/// Produce one bucket per key in `keys`, taking it from `sparse` when
/// present and creating an empty one with `empty` otherwise.
///
/// `sparse` must be sorted in the same order as `keys`. Buckets in `sparse`
/// whose key is not in `keys` are dropped.
pub(crate) fn fill_gaps<K, T>(
    keys: impl IntoIterator<Item = K>,
    sparse: Vec<T>,
    key_of: impl Fn(&T) -> K,
    empty: impl Fn(K) -> T,
) -> Vec<T>
where
    K: PartialEq + PartialOrd + Copy,
{
    let mut sparse = sparse.into_iter().peekable();

    keys.into_iter()
        .map(|key| {
            while sparse.next_if(|bucket| key_of(bucket) < key).is_some() {}

            sparse
                .next_if(|bucket| key_of(bucket) == key)
                .unwrap_or_else(|| empty(key))
        })
        .collect()
}
