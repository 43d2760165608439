//! Ordered date index over a sparse trading-day calendar.

use time::Date;

use crate::error::LookupError;

/// Binary search over `data`, a chronologically sorted slice of dates.
///
/// With `force`, the target must be present in `data` and its index is
/// returned; a miss after exhausting `[low, high]` is an error. Without
/// `force`, a miss resolves to the index of the latest date not after the
/// target. That closest-prior contract is what maps a non-trading calendar
/// day onto the trading day preceding it.
///
/// Callers pass `low = 0` and `high = data.len() - 1` unless they already
/// narrowed the window. The search is pure and keeps no state between calls.
pub fn find(
    data: &[Date],
    target: Date,
    low: usize,
    high: usize,
    force: bool,
) -> Result<usize, LookupError> {
    let (earliest, latest) = match (data.first(), data.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(LookupError::NotFound {
                what: String::from("date index is empty"),
            })
        }
    };

    if target < earliest || (force && target > latest) {
        return Err(LookupError::OutOfBounds {
            target,
            earliest,
            latest,
        });
    }

    let mut lo = low as i64;
    let mut hi = high as i64;
    while lo <= hi {
        let mid = ((lo + hi) / 2) as usize;
        if data[mid] == target {
            return Ok(mid);
        }
        if data[mid] > target {
            hi = mid as i64 - 1;
        } else {
            lo = mid as i64 + 1;
        }
    }

    if force {
        Err(LookupError::NotFound {
            what: format!("no trading day indexed at {target}"),
        })
    } else {
        // The pointers converged one slot past the largest element <= target.
        // `hi` cannot go negative here: target >= data[0] was checked above.
        Ok(hi as usize)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn calendar() -> Vec<Date> {
        vec![
            date!(2022 - 01 - 03),
            date!(2022 - 01 - 04),
            date!(2022 - 01 - 05),
            date!(2022 - 01 - 07),
            date!(2022 - 01 - 12),
        ]
    }

    #[test]
    fn forced_search_finds_every_member() {
        let data = calendar();
        for (index, target) in data.iter().enumerate() {
            let found = find(&data, *target, 0, data.len() - 1, true).expect("member must be found");
            assert_eq!(found, index);
        }
    }

    #[test]
    fn target_below_first_is_out_of_bounds_regardless_of_force() {
        let data = calendar();
        for force in [true, false] {
            let err = find(&data, date!(2022 - 01 - 02), 0, data.len() - 1, force)
                .expect_err("must fail");
            assert!(matches!(err, LookupError::OutOfBounds { .. }));
        }
    }

    #[test]
    fn target_above_last_resolves_to_last_without_force() {
        let data = calendar();
        let found =
            find(&data, date!(2022 - 02 - 01), 0, data.len() - 1, false).expect("must resolve");
        assert_eq!(found, data.len() - 1);
    }

    #[test]
    fn target_above_last_is_out_of_bounds_with_force() {
        let data = calendar();
        let err = find(&data, date!(2022 - 02 - 01), 0, data.len() - 1, true).expect_err("must fail");
        assert!(matches!(err, LookupError::OutOfBounds { .. }));
    }

    #[test]
    fn miss_between_members_resolves_to_prior_index() {
        let data = calendar();
        // Jan 6 and the weekend sit between Jan 5/7 and Jan 7/12.
        for (target, prior) in [
            (date!(2022 - 01 - 06), 2),
            (date!(2022 - 01 - 08), 3),
            (date!(2022 - 01 - 11), 3),
        ] {
            let found = find(&data, target, 0, data.len() - 1, false).expect("must resolve");
            assert_eq!(found, prior, "closest-prior index for {target}");
        }
    }

    #[test]
    fn forced_miss_between_members_is_not_found() {
        let data = calendar();
        let err = find(&data, date!(2022 - 01 - 06), 0, data.len() - 1, true).expect_err("must fail");
        assert!(matches!(err, LookupError::NotFound { .. }));
    }

    #[test]
    fn empty_index_is_not_found() {
        let err = find(&[], date!(2022 - 01 - 03), 0, 0, false).expect_err("must fail");
        assert!(matches!(err, LookupError::NotFound { .. }));
    }
}
