//! Tagged step outcomes and the retry loop that consumes them
//!
//! Each generation step reports `Success`, `Retry` (a constraint was missed,
//! drawing again may help) or `Fail` (this attempt is over). The retry policy
//! lives in [`retry`] instead of being spread through nested loops.

use crate::core::Bonus;
use log::debug;
use thiserror::Error;

/// Result of one generation step
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Retry(Reason),
    Fail(Reason),
}

/// Why a step or attempt did not produce a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Reason {
    #[error("playable region too small ({playable} cells, need {required})")]
    RegionTooSmall { playable: usize, required: usize },
    #[error("only {placed} of {target} {tier:?} cells could be placed")]
    BonusShortfall {
        tier: Bonus,
        placed: usize,
        target: usize,
    },
    #[error("letter pool rejected: {0}")]
    PoolConstraint(String),
    #[error("estimate {estimate} outside acceptance band [{min}, {max}]")]
    EstimateOutOfBand { estimate: u32, min: u32, max: u32 },
    #[error("{step} gave up after {tries} tries (last: {last})")]
    RetriesExhausted {
        step: &'static str,
        tries: usize,
        last: Box<Reason>,
    },
    #[error("time budget exhausted")]
    TimeBudgetExceeded,
}

impl<T> Outcome<T> {
    /// Convert to `Option`, dropping the reason
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Retry(_) | Self::Fail(_) => None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Run `step` until it succeeds or fails outright, at most `max_tries` times
///
/// `Retry` outcomes are logged and retried; running out of tries turns the
/// last reason into `Fail(RetriesExhausted)`.
///
/// # Examples
/// ```
/// use wordtile::generator::{retry, Outcome, Reason};
///
/// let outcome = retry("count", 5, |n| {
///     if n < 3 {
///         Outcome::Retry(Reason::TimeBudgetExceeded)
///     } else {
///         Outcome::Success(n)
///     }
/// });
/// assert_eq!(outcome, Outcome::Success(3));
/// ```
pub fn retry<T>(
    step: &'static str,
    max_tries: usize,
    mut run: impl FnMut(usize) -> Outcome<T>,
) -> Outcome<T> {
    let mut last = None;
    for n in 1..=max_tries {
        match run(n) {
            Outcome::Retry(reason) => {
                debug!("{step}: try {n}/{max_tries} rejected: {reason}");
                last = Some(reason);
            }
            done => return done,
        }
    }
    Outcome::Fail(Reason::RetriesExhausted {
        step,
        tries: max_tries,
        last: Box::new(last.unwrap_or(Reason::TimeBudgetExceeded)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_returns_first_success() {
        let mut calls = 0;
        let outcome = retry("step", 10, |n| {
            calls += 1;
            if n == 4 {
                Outcome::Success("done")
            } else {
                Outcome::Retry(Reason::PoolConstraint("x".into()))
            }
        });
        assert_eq!(outcome, Outcome::Success("done"));
        assert_eq!(calls, 4);
    }

    #[test]
    fn retry_stops_on_fail() {
        let mut calls = 0;
        let outcome: Outcome<()> = retry("step", 10, |_| {
            calls += 1;
            Outcome::Fail(Reason::TimeBudgetExceeded)
        });
        assert_eq!(outcome, Outcome::Fail(Reason::TimeBudgetExceeded));
        assert_eq!(calls, 1);
    }

    #[test]
    fn exhausted_retries_become_fail_with_last_reason() {
        let outcome: Outcome<()> = retry("shape", 3, |n| {
            Outcome::Retry(Reason::RegionTooSmall {
                playable: n,
                required: 10,
            })
        });
        match outcome {
            Outcome::Fail(Reason::RetriesExhausted { step, tries, last }) => {
                assert_eq!(step, "shape");
                assert_eq!(tries, 3);
                assert_eq!(
                    *last,
                    Reason::RegionTooSmall {
                        playable: 3,
                        required: 10
                    }
                );
            }
            other => panic!("expected exhausted retries, got {other:?}"),
        }
    }

    #[test]
    fn outcome_success_helper() {
        assert_eq!(Outcome::Success(5).success(), Some(5));
        assert_eq!(Outcome::<u8>::Retry(Reason::TimeBudgetExceeded).success(), None);
        assert!(Outcome::Success(()).is_success());
    }
}
