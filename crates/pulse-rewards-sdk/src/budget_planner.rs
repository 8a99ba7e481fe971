/*!
# Campaign Budget Planning

This module provides isolated, thoroughly tested budget planning math.
Separating this from the instruction builders allows for focused testing of
the calculations a creator runs before funding a campaign on chain.

## Planning Hierarchy

The planner supports two levels of planning:
1. **Budget → Split**: Divide a budget into the user reward pool and the platform fee
2. **Pool → Rewards**: Divide the reward pool into per-unit rewards or fundable action counts

## Key Safety Features

- **Matches the program**: All splits and per-unit rewards use the same
  integer floor math the program applies, so a plan never disagrees with
  what the ledger derives after funding
- **Micro-USD Aware**: Amounts are tracked in whole micro-USD (1 USD = 1,000,000)
- **Conservative Rounding**: Sub-micro precision is floored, never rounded up
- **Overflow Protection**: Safe arithmetic throughout
- **Dust Tracking**: Accurately reports the remainder no unit reward can reach

## Example Usage

```rust
use pulse_rewards_sdk::BudgetPlanner;
use rust_decimal::prelude::*;
use rust_decimal::dec;

// Default 20% platform fee (2000 basis points)
let planner = BudgetPlanner::default_fee().expect("Failed to create planner");

// Step 1: Budget → Split
let split = planner.split_budget(dec!(100)).expect("Failed to split budget");
assert_eq!(split.user_reward_pool_usd, dec!(80));

// Step 2: Pool → Rewards
let schedule = planner
    .plan_unit_rewards(dec!(625), 10)
    .expect("Failed to plan rewards");
assert_eq!(schedule.reward_per_unit_usd, dec!(50));
```
*/

use pulse_rewards::constants::{BPS_DENOMINATOR, DEFAULT_PLATFORM_FEE_BPS, MICRO_USD_PER_USD};
use rust_decimal::prelude::*;
use thiserror::Error;

/// Number of fractional digits a micro-USD amount carries.
const USD_DECIMALS: u32 = 6;

/// Errors that can occur during budget planning
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid platform fee: {0} bps (must be 0-{BPS_DENOMINATOR})")]
    InvalidFeeBps(u16),

    #[error("Budget must be a positive amount, got {0}")]
    InvalidBudget(Decimal),

    #[error("Zero target units not allowed")]
    ZeroTargetUnits,

    #[error("Zero per-unit reward not allowed")]
    ZeroUnitReward,

    #[error("Calculation overflow: {0}")]
    Overflow(String),
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Result of splitting a budget into reward pool and platform fee
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSplit {
    /// Funded budget (human-readable USD)
    pub budget_usd: Decimal,
    /// Funded budget (micro-USD)
    pub budget_micro: u64,

    /// Portion reserved for user rewards (human-readable USD)
    pub user_reward_pool_usd: Decimal,
    /// Portion reserved for user rewards (micro-USD)
    pub user_reward_pool_micro: u64,

    /// Portion retained as the platform fee (human-readable USD)
    pub platform_fee_usd: Decimal,
    /// Portion retained as the platform fee (micro-USD)
    pub platform_fee_micro: u64,
}

/// Result of dividing a reward pool into per-unit rewards
#[derive(Debug, Clone, PartialEq)]
pub struct RewardSchedule {
    /// The split this schedule was planned from
    pub split: BudgetSplit,

    /// Reward paid per verified unit (human-readable USD)
    pub reward_per_unit_usd: Decimal,
    /// Reward paid per verified unit (micro-USD)
    pub reward_per_unit_micro: u64,

    /// Number of unit rewards the pool can fund in full
    pub fundable_units: u64,

    /// Pool remainder no full unit reward can reach (human-readable USD)
    pub dust_usd: Decimal,
    /// Pool remainder no full unit reward can reach (micro-USD)
    pub dust_micro: u64,
}

/// Budget planner with a fixed platform fee rate
///
/// Supports two-level planning:
/// 1. Budget → user reward pool + platform fee (by basis points)
/// 2. Reward pool → per-unit rewards (by target units or fixed unit price)
#[derive(Debug)]
pub struct BudgetPlanner {
    platform_fee_bps: u16,
    micro_precision: Decimal,
}

impl BudgetPlanner {
    /// Create a new planner with a platform fee in basis points
    pub fn new(platform_fee_bps: u16) -> PlanResult<Self> {
        if platform_fee_bps > BPS_DENOMINATOR {
            return Err(PlanError::InvalidFeeBps(platform_fee_bps));
        }

        // Smallest representable amount, 0.000001 USD
        let micro_precision = Decimal::new(1, USD_DECIMALS);

        Ok(Self {
            platform_fee_bps,
            micro_precision,
        })
    }

    /// Create a planner with the standard 20% platform fee
    pub fn default_fee() -> PlanResult<Self> {
        Self::new(DEFAULT_PLATFORM_FEE_BPS)
    }

    /// Split a budget into the user reward pool and the platform fee
    ///
    /// The pool is floored at the micro-USD level and the fee takes the rest,
    /// so `pool + fee == budget` always holds exactly.
    pub fn split_budget(&self, budget_usd: Decimal) -> PlanResult<BudgetSplit> {
        if budget_usd <= Decimal::ZERO {
            return Err(PlanError::InvalidBudget(budget_usd));
        }

        // Floor sub-micro input before converting so the plan works on the
        // amount that can actually be funded
        let budget_usd = self.round_to_micro_precision(budget_usd);
        if budget_usd <= Decimal::ZERO {
            return Err(PlanError::InvalidBudget(budget_usd));
        }

        let budget_micro = usd_to_micro(budget_usd)?;

        // Same widening and floor the program applies when the campaign is
        // created, down to the order of operations
        let pool_bps = (BPS_DENOMINATOR - self.platform_fee_bps) as u128;
        let pool_wide = (budget_micro as u128) * pool_bps / (BPS_DENOMINATOR as u128);
        let user_reward_pool_micro = u64::try_from(pool_wide)
            .map_err(|_| PlanError::Overflow(format!("pool split of {} micro-USD", budget_micro)))?;
        let platform_fee_micro = budget_micro - user_reward_pool_micro;

        Ok(BudgetSplit {
            budget_usd,
            budget_micro,
            user_reward_pool_usd: micro_to_usd(user_reward_pool_micro),
            user_reward_pool_micro,
            platform_fee_usd: micro_to_usd(platform_fee_micro),
            platform_fee_micro,
        })
    }

    /// Plan per-unit rewards for a campaign that divides its pool across a
    /// fixed number of target units
    ///
    /// Integer floor division leaves a remainder when the pool does not divide
    /// evenly; that remainder is reported as dust and stays in the pool until
    /// the creator reclaims it.
    pub fn plan_unit_rewards(
        &self,
        budget_usd: Decimal,
        target_units: u64,
    ) -> PlanResult<RewardSchedule> {
        if target_units == 0 {
            return Err(PlanError::ZeroTargetUnits);
        }

        let split = self.split_budget(budget_usd)?;

        let reward_per_unit_micro = split.user_reward_pool_micro / target_units;
        let dust_micro = split.user_reward_pool_micro - reward_per_unit_micro * target_units;

        Ok(RewardSchedule {
            reward_per_unit_usd: micro_to_usd(reward_per_unit_micro),
            reward_per_unit_micro,
            fundable_units: target_units,
            dust_usd: micro_to_usd(dust_micro),
            dust_micro,
            split,
        })
    }

    /// Plan how many fixed-price actions a pool can fund in full
    ///
    /// Used for campaigns that pay a flat per-action reward instead of
    /// dividing the pool by a target.
    pub fn plan_fixed_rewards(
        &self,
        budget_usd: Decimal,
        reward_per_unit_micro: u64,
    ) -> PlanResult<RewardSchedule> {
        if reward_per_unit_micro == 0 {
            return Err(PlanError::ZeroUnitReward);
        }

        let split = self.split_budget(budget_usd)?;

        let fundable_units = split.user_reward_pool_micro / reward_per_unit_micro;
        let dust_micro = split.user_reward_pool_micro - fundable_units * reward_per_unit_micro;

        Ok(RewardSchedule {
            reward_per_unit_usd: micro_to_usd(reward_per_unit_micro),
            reward_per_unit_micro,
            fundable_units,
            dust_usd: micro_to_usd(dust_micro),
            dust_micro,
            split,
        })
    }

    /// Round an amount down to whole micro-USD
    pub fn round_to_micro_precision(&self, amount: Decimal) -> Decimal {
        (amount / self.micro_precision).floor() * self.micro_precision
    }

    pub fn platform_fee_bps(&self) -> u16 {
        self.platform_fee_bps
    }

    pub fn micro_precision(&self) -> Decimal {
        self.micro_precision
    }
}

/// Convert a human USD amount (Decimal) to micro-USD (u64)
///
/// Sub-micro precision is floored. Negative amounts are rejected.
pub fn usd_to_micro(amount_usd: Decimal) -> PlanResult<u64> {
    if amount_usd < Decimal::ZERO {
        return Err(PlanError::InvalidBudget(amount_usd));
    }

    let micro = amount_usd * Decimal::from(MICRO_USD_PER_USD);

    micro
        .floor()
        .to_u64()
        .ok_or_else(|| PlanError::Overflow(format!("{} USD exceeds the micro-USD range", amount_usd)))
}

/// Convert micro-USD (u64) back to a human USD amount (Decimal)
pub fn micro_to_usd(amount_micro: u64) -> Decimal {
    Decimal::from_i128_with_scale(amount_micro as i128, USD_DECIMALS).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_rewards::constants::SPARK_MESSAGE_REWARD;
    use rust_decimal::dec;

    #[test]
    fn test_standard_split_simple() {
        let planner = BudgetPlanner::default_fee().unwrap();

        let split = planner.split_budget(dec!(100)).unwrap();

        // 20% fee: 100 USD -> 80 USD pool + 20 USD fee
        assert_eq!(split.budget_usd, dec!(100));
        assert_eq!(split.user_reward_pool_usd, dec!(80));
        assert_eq!(split.platform_fee_usd, dec!(20));

        // Micro-USD amounts
        assert_eq!(split.budget_micro, 100_000_000);
        assert_eq!(split.user_reward_pool_micro, 80_000_000);
        assert_eq!(split.platform_fee_micro, 20_000_000);
    }

    #[test]
    fn test_split_conserves_budget_on_odd_amounts() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // 0.000001 USD cannot split 80/20 evenly
        let split = planner.split_budget(dec!(0.000003)).unwrap();

        // floor(3 * 8000 / 10000) = 2, fee takes the rest
        assert_eq!(split.user_reward_pool_micro, 2);
        assert_eq!(split.platform_fee_micro, 1);
        assert_eq!(
            split.user_reward_pool_micro + split.platform_fee_micro,
            split.budget_micro
        );
    }

    #[test]
    fn test_sub_micro_precision_floored() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // Tenths of a micro-USD cannot be funded
        let split = planner.split_budget(dec!(99.9999995)).unwrap();

        assert_eq!(split.budget_usd, dec!(99.999999));
        assert_eq!(split.budget_micro, 99_999_999);
    }

    #[test]
    fn test_fixed_reward_plan_message_campaign() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // 100 USD budget paying the flat 0.01 USD message reward
        let schedule = planner
            .plan_fixed_rewards(dec!(100), SPARK_MESSAGE_REWARD)
            .unwrap();

        // 80 USD pool funds 8000 messages with no dust
        assert_eq!(schedule.reward_per_unit_usd, dec!(0.01));
        assert_eq!(schedule.fundable_units, 8_000);
        assert_eq!(schedule.dust_micro, 0);

        // After 8 verified messages the pool holds 79.92 USD
        let paid = 8 * schedule.reward_per_unit_micro;
        let remaining = schedule.split.user_reward_pool_micro - paid;
        assert_eq!(micro_to_usd(remaining), dec!(79.92));
    }

    #[test]
    fn test_unit_reward_plan_volume_campaign() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // 625 USD budget -> 500 USD pool, divided across 10 loops
        let schedule = planner.plan_unit_rewards(dec!(625), 10).unwrap();

        assert_eq!(schedule.split.user_reward_pool_usd, dec!(500));
        assert_eq!(schedule.reward_per_unit_usd, dec!(50));
        assert_eq!(schedule.reward_per_unit_micro, 50_000_000);
        assert_eq!(schedule.dust_micro, 0);

        // A user capped at 2 loops earns 100 USD
        let per_user = 2 * schedule.reward_per_unit_micro;
        assert_eq!(micro_to_usd(per_user), dec!(100));
    }

    #[test]
    fn test_unit_reward_dust_with_indivisible_pool() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // 125 USD budget -> 100 USD pool, split 3 ways
        let schedule = planner.plan_unit_rewards(dec!(125), 3).unwrap();

        // 100_000_000 / 3 = 33_333_333 micro-USD with 1 micro-USD of dust
        assert_eq!(schedule.reward_per_unit_micro, 33_333_333);
        assert_eq!(schedule.reward_per_unit_usd, dec!(33.333333));
        assert_eq!(schedule.dust_micro, 1);
        assert_eq!(schedule.dust_usd, dec!(0.000001));

        // Prove the math: rewards + dust = pool
        let allocated = schedule.reward_per_unit_micro * 3;
        assert_eq!(
            allocated + schedule.dust_micro,
            schedule.split.user_reward_pool_micro
        );
    }

    #[test]
    fn test_custom_fee_rates() {
        // 0% fee: entire budget becomes the pool
        let no_fee = BudgetPlanner::new(0).unwrap();
        let split = no_fee.split_budget(dec!(50)).unwrap();
        assert_eq!(split.user_reward_pool_usd, dec!(50));
        assert_eq!(split.platform_fee_micro, 0);

        // 100% fee: entire budget becomes the fee
        let all_fee = BudgetPlanner::new(10_000).unwrap();
        let split = all_fee.split_budget(dec!(50)).unwrap();
        assert_eq!(split.user_reward_pool_micro, 0);
        assert_eq!(split.platform_fee_usd, dec!(50));
    }

    #[test]
    fn test_invalid_inputs() {
        // Fee above 100%
        assert!(BudgetPlanner::new(10_001).is_err());

        let planner = BudgetPlanner::default_fee().unwrap();

        // Zero budget
        assert!(planner.split_budget(dec!(0)).is_err());

        // Negative budget
        assert!(planner.split_budget(dec!(-10)).is_err());

        // Budget that floors to zero
        assert!(planner.split_budget(dec!(0.0000001)).is_err());

        // Zero target units
        assert!(planner.plan_unit_rewards(dec!(100), 0).is_err());

        // Zero unit price
        assert!(planner.plan_fixed_rewards(dec!(100), 0).is_err());
    }

    #[test]
    fn test_micro_usd_conversions() {
        assert_eq!(usd_to_micro(dec!(1)).unwrap(), 1_000_000);
        assert_eq!(usd_to_micro(dec!(0.01)).unwrap(), 10_000);
        assert_eq!(usd_to_micro(dec!(0.000001)).unwrap(), 1);
        assert_eq!(usd_to_micro(dec!(0.0000009)).unwrap(), 0);

        assert_eq!(micro_to_usd(1_000_000), dec!(1));
        assert_eq!(micro_to_usd(10_000), dec!(0.01));
        assert_eq!(micro_to_usd(79_920_000), dec!(79.92));

        // Negative amounts rejected
        assert!(usd_to_micro(dec!(-1)).is_err());
    }

    #[test]
    fn test_large_budget_no_overflow() {
        let planner = BudgetPlanner::default_fee().unwrap();

        // 1 trillion USD, well inside the u64 micro-USD range
        let split = planner.split_budget(dec!(1000000000000)).unwrap();

        assert_eq!(split.budget_micro, 1_000_000_000_000_000_000);
        assert_eq!(split.user_reward_pool_micro, 800_000_000_000_000_000);
        assert_eq!(split.platform_fee_micro, 200_000_000_000_000_000);

        // Past the u64 micro-USD range the conversion must error, not wrap
        assert!(usd_to_micro(dec!(100000000000000)).is_err());
    }

    #[test]
    fn test_plan_matches_funding_walkthrough() {
        // End-to-end numbers for a creator funding a 10-loop campaign
        let planner = BudgetPlanner::default_fee().unwrap();
        let schedule = planner.plan_unit_rewards(dec!(625), 10).unwrap();

        let mut pool = schedule.split.user_reward_pool_micro;
        for _ in 0..10 {
            pool -= schedule.reward_per_unit_micro;
        }

        println!("🔍 Funding walkthrough:");
        println!("   Budget: {} USD", schedule.split.budget_usd);
        println!("   Pool: {} USD", schedule.split.user_reward_pool_usd);
        println!("   Per loop: {} USD", schedule.reward_per_unit_usd);
        println!("   Pool after 10 loops: {} micro-USD", pool);

        // Fully distributed pool leaves exactly the dust behind
        assert_eq!(pool, schedule.dust_micro);
        assert_eq!(pool, 0);
    }
}
