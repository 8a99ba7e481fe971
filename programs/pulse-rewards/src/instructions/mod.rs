pub mod activate_campaign;
pub mod ban_user;
pub mod cancel_campaign;
pub mod create_campaign;
pub mod deposit_balance;
pub mod finalize_campaign;
pub mod initialize_ledger;
pub mod join_campaign;
pub mod pause_campaign;
pub mod reclaim_campaign_funds;
pub mod register_user;
pub mod reject_action;
pub mod request_payout;
pub mod resume_campaign;
pub mod set_ledger_paused;
pub mod set_payout_address;
pub mod update_operator;
pub mod update_payout_status;
pub mod verify_action;
pub mod withdraw_balance;
pub mod withdraw_platform_fees;

pub use activate_campaign::*;
pub use ban_user::*;
pub use cancel_campaign::*;
pub use create_campaign::*;
pub use deposit_balance::*;
pub use finalize_campaign::*;
pub use initialize_ledger::*;
pub use join_campaign::*;
pub use pause_campaign::*;
pub use reclaim_campaign_funds::*;
pub use register_user::*;
pub use reject_action::*;
pub use request_payout::*;
pub use resume_campaign::*;
pub use set_ledger_paused::*;
pub use set_payout_address::*;
pub use update_operator::*;
pub use update_payout_status::*;
pub use verify_action::*;
pub use withdraw_balance::*;
pub use withdraw_platform_fees::*;
