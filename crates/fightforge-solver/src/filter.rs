//! Point budget filter.

/// Accepts builds whose point cost fits the budget.
///
/// With a tolerance `t > 0`, builds must also spend at least
/// `budget - t` points so that few points are left unspent.
///
/// # Examples
///
/// ```
/// use fightforge_solver::BudgetFilter;
///
/// let exact_or_under = BudgetFilter::new(55, 0);
/// assert!(exact_or_under.accepts(0));
/// assert!(exact_or_under.accepts(55));
/// assert!(!exact_or_under.accepts(56));
///
/// let banded = BudgetFilter::new(55, 4);
/// assert!(!banded.accepts(50));
/// assert!(banded.accepts(51));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetFilter {
    budget: u32,
    tolerance: u32,
}

impl BudgetFilter {
    pub fn new(budget: u32, tolerance: u32) -> Self {
        Self { budget, tolerance }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// Lowest accepted point cost.
    #[inline]
    pub fn floor(&self) -> u32 {
        if self.tolerance == 0 {
            0
        } else {
            self.budget.saturating_sub(self.tolerance)
        }
    }

    #[inline]
    pub fn accepts(&self, point_cost: u32) -> bool {
        point_cost <= self.budget && point_cost >= self.floor()
    }
}
