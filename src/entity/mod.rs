pub mod applied_promotion;
pub mod booking;
pub mod guest;
pub mod membership_plan;
pub mod redemption;
pub mod voucher;

pub use applied_promotion::PromotionKind;
pub use voucher::{DiscountType, ScopeList, VoucherSource};
