//! Deterministic ordering of service records.
//!
//! The table sorts by soonest arrival first; services with no ETA sink
//! to the bottom. Ties (equal or both-absent ETA) break on the bus
//! number under a numeric-aware comparison, so route "2" sorts before
//! "12" rather than after it.

use std::cmp::Ordering;

use crate::domain::ServiceRecord;

/// Impose the board's total order on a list of services.
///
/// Pure and stable: the input is not mutated, and records that compare
/// equal keep their input order, which makes the function idempotent.
pub fn order_services(services: &[ServiceRecord]) -> Vec<ServiceRecord> {
    let mut ordered = services.to_vec();
    ordered.sort_by(compare_services);
    ordered
}

fn compare_services(a: &ServiceRecord, b: &ServiceRecord) -> Ordering {
    cmp_eta(a.eta_minutes, b.eta_minutes)
        .then_with(|| natural_cmp(&a.bus_number, &b.bus_number))
}

/// Ascending ETA with absent values after every finite value.
fn cmp_eta(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        // ETAs are finite by construction, so partial_cmp cannot fail;
        // Equal is a safe fallback either way.
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Numeric-aware, case-insensitive string comparison.
///
/// Embedded digit runs compare by numeric value rather than
/// lexicographically ("2" < "12"), and alphabetic characters compare
/// case-insensitively ("2A" == "2a"). Digit runs of equal value but
/// different length ("007" vs "7") order shorter-first so the
/// comparison stays antisymmetric.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let a_run = take_digit_run(&mut a_chars);
                    let b_run = take_digit_run(&mut b_chars);
                    let ord = cmp_digit_runs(&a_run, &b_run);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let xl = x.to_ascii_lowercase();
                    let yl = y.to_ascii_lowercase();
                    if xl != yl {
                        return xl.cmp(&yl);
                    }
                    a_chars.next();
                    b_chars.next();
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Compare two digit runs by numeric value without parsing them, so
/// arbitrarily long runs cannot overflow.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');

    // More significant digits means a larger value; equal lengths
    // compare digit by digit.
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // Same value: fewer leading zeros first ("7" before "007").
        .then_with(|| a.len().cmp(&b.len()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::ServiceRecord;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = ServiceRecord> {
        (
            "[0-9A-Za-z]{1,5}",
            proptest::option::of(0u16..240),
        )
            .prop_map(|(number, eta)| {
                let record = ServiceRecord::new(number, "Op");
                match eta {
                    Some(mins) => record.with_eta(f64::from(mins)),
                    None => record,
                }
            })
    }

    proptest! {
        /// Ordering is idempotent: sorting a sorted list is a no-op.
        #[test]
        fn idempotent(services in proptest::collection::vec(arb_record(), 0..16)) {
            let once = order_services(&services);
            let twice = order_services(&once);
            prop_assert_eq!(once, twice);
        }

        /// Ordering is a permutation of its input.
        #[test]
        fn permutation(services in proptest::collection::vec(arb_record(), 0..16)) {
            let ordered = order_services(&services);
            prop_assert_eq!(ordered.len(), services.len());
            for record in &services {
                let in_count = services.iter().filter(|r| *r == record).count();
                let out_count = ordered.iter().filter(|r| *r == record).count();
                prop_assert_eq!(in_count, out_count);
            }
        }

        /// Every record with an ETA sorts before every record without one.
        #[test]
        fn absent_eta_sorts_last(services in proptest::collection::vec(arb_record(), 0..16)) {
            let ordered = order_services(&services);
            let first_absent = ordered.iter().position(|r| r.eta_minutes.is_none());
            if let Some(idx) = first_absent {
                prop_assert!(ordered[idx..].iter().all(|r| r.eta_minutes.is_none()));
            }
        }

        /// natural_cmp agrees with itself under argument swap.
        #[test]
        fn natural_cmp_antisymmetric(a in "[0-9A-Za-z]{0,6}", b in "[0-9A-Za-z]{0,6}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }
    }
}
