//! Composite termination.
//!
//! Uses macro-generated tuple implementations, no boxing.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when ANY child in the wrapped tuple terminates.
///
/// # Examples
///
/// ```
/// use shiftforge_solver::{NodeCountTermination, OrTermination, TimeTermination};
///
/// // 30 seconds or 1_000_000 branches, whichever comes first
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1_000_000),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &SearchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
