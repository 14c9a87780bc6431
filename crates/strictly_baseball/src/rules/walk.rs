//! Forced advances on a walk.

use crate::types::{Base, Bases, PlayerId};
use tracing::{debug, instrument};

/// Awards first base to `batter`, pushing runners ahead only when forced.
///
/// A runner moves only if every base behind it is occupied. With the bases
/// loaded the runner on third is forced home; that runner is returned so the
/// caller can credit the run.
#[instrument(skip(bases))]
pub fn force_advance(bases: &mut Bases, batter: Option<PlayerId>) -> Option<PlayerId> {
    let mut scored = None;
    if bases.is_occupied(Base::First) {
        if bases.is_occupied(Base::Second) {
            if bases.is_occupied(Base::Third) {
                scored = bases.take(Base::Third);
                debug!(runner = ?scored, "Runner forced home");
            }
            let from_second = bases.take(Base::Second);
            bases.set(Base::Third, from_second);
        }
        let from_first = bases.take(Base::First);
        bases.set(Base::Second, from_first);
    }
    bases.set(Base::First, batter);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<PlayerId> {
        Some(PlayerId::from(s))
    }

    fn bases(first: Option<&str>, second: Option<&str>, third: Option<&str>) -> Bases {
        let mut bases = Bases::default();
        bases.set(Base::First, first.map(PlayerId::from));
        bases.set(Base::Second, second.map(PlayerId::from));
        bases.set(Base::Third, third.map(PlayerId::from));
        bases
    }

    #[test]
    fn test_empty_bases_batter_to_first() {
        let mut b = Bases::default();
        assert_eq!(force_advance(&mut b, id("bat")), None);
        assert_eq!(b, bases(Some("bat"), None, None));
    }

    #[test]
    fn test_runner_on_second_not_forced() {
        let mut b = bases(None, Some("r2"), None);
        assert_eq!(force_advance(&mut b, id("bat")), None);
        assert_eq!(b, bases(Some("bat"), Some("r2"), None));
    }

    #[test]
    fn test_first_and_third_only_first_moves() {
        let mut b = bases(Some("r1"), None, Some("r3"));
        assert_eq!(force_advance(&mut b, id("bat")), None);
        assert_eq!(b, bases(Some("bat"), Some("r1"), Some("r3")));
    }

    #[test]
    fn test_first_and_second_cascade() {
        let mut b = bases(Some("r1"), Some("r2"), None);
        assert_eq!(force_advance(&mut b, id("bat")), None);
        assert_eq!(b, bases(Some("bat"), Some("r1"), Some("r2")));
    }

    #[test]
    fn test_bases_loaded_forces_run() {
        let mut b = bases(Some("r1"), Some("r2"), Some("r3"));
        assert_eq!(force_advance(&mut b, id("bat")), id("r3"));
        assert_eq!(b, bases(Some("bat"), Some("r1"), Some("r2")));
    }
}
