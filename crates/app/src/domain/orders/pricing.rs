//! Order pricing.
//!
//! Everything here is pure: carts are priced against catalog records already
//! loaded by the caller, and settlement is checked against a profile snapshot.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::domain::{
    menu::records::{MenuItemRecord, MenuItemUuid},
    orders::data::NewOrderLine,
};

/// Minor units one redeemed reward point is worth.
pub const POINT_VALUE: u64 = 50;

/// Largest quantity a single order line may carry.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("order has no items")]
    EmptyOrder,

    #[error("quantity for menu item {0} must be at least 1")]
    ZeroQuantity(MenuItemUuid),

    #[error("quantity for menu item {0} is too large")]
    QuantityTooLarge(MenuItemUuid),

    #[error("menu item {0} not found")]
    UnknownMenuItem(MenuItemUuid),

    #[error("redeemed points are worth {redeemed_value}, more than the order total {total_price}")]
    RedemptionExceedsTotal { total_price: u64, redeemed_value: u64 },

    #[error("order amounts are out of range")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("insufficient reward points")]
    InsufficientPoints,

    #[error("settlement amounts are out of range")]
    Overflow,
}

/// A cart line priced from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub unit_reward_points: u64,
}

/// Totals for a cart before it is checked against a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub lines: Vec<PricedLine>,
    pub total_price: u64,
    pub reward_points_earned: u64,
    pub reward_points_redeemed: u64,
    pub net_charge: u64,
}

/// Profile balances after an order is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub balance_after: i64,
    pub points_after: u64,
    pub balance_delta: i64,
    pub points_delta: i64,
}

/// Validate cart lines and merge repeated menu items.
///
/// Quantities of repeated items are summed; the first occurrence fixes the
/// line's position.
///
/// # Errors
///
/// - [`PricingError::EmptyOrder`] when there are no lines.
/// - [`PricingError::ZeroQuantity`] when any line orders nothing.
/// - [`PricingError::QuantityTooLarge`] when a line, or the sum of repeated lines,
///   exceeds [`MAX_LINE_QUANTITY`].
pub fn merge_lines(lines: &[NewOrderLine]) -> Result<Vec<NewOrderLine>, PricingError> {
    if lines.is_empty() {
        return Err(PricingError::EmptyOrder);
    }

    let mut merged: Vec<NewOrderLine> = Vec::with_capacity(lines.len());
    let mut positions: FxHashMap<MenuItemUuid, usize> = FxHashMap::default();

    for line in lines {
        if line.quantity == 0 {
            return Err(PricingError::ZeroQuantity(line.menu_item));
        }

        match positions.get(&line.menu_item) {
            Some(&position) => {
                let existing = &mut merged[position];

                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .filter(|quantity| *quantity <= MAX_LINE_QUANTITY)
                    .ok_or(PricingError::QuantityTooLarge(line.menu_item))?;
            }
            None => {
                if line.quantity > MAX_LINE_QUANTITY {
                    return Err(PricingError::QuantityTooLarge(line.menu_item));
                }

                positions.insert(line.menu_item, merged.len());
                merged.push(*line);
            }
        }
    }

    Ok(merged)
}

/// Price merged cart lines against catalog records.
///
/// # Errors
///
/// - [`PricingError::UnknownMenuItem`] when a line's item is not in `catalog`.
/// - [`PricingError::RedemptionExceedsTotal`] when the redeemed points are worth more than
///   the order.
/// - [`PricingError::Overflow`] when any total does not fit.
pub fn quote(
    lines: &[NewOrderLine],
    catalog: &[MenuItemRecord],
    reward_points_redeemed: u64,
) -> Result<Quote, PricingError> {
    let catalog: FxHashMap<MenuItemUuid, &MenuItemRecord> =
        catalog.iter().map(|item| (item.uuid, item)).collect();

    let mut priced = Vec::with_capacity(lines.len());
    let mut total_price = 0_u64;
    let mut reward_points_earned = 0_u64;

    for line in lines {
        let item = catalog
            .get(&line.menu_item)
            .ok_or(PricingError::UnknownMenuItem(line.menu_item))?;

        let quantity = u64::from(line.quantity);

        total_price = item
            .price
            .checked_mul(quantity)
            .and_then(|subtotal| total_price.checked_add(subtotal))
            .ok_or(PricingError::Overflow)?;

        reward_points_earned = item
            .reward_points
            .checked_mul(quantity)
            .and_then(|points| reward_points_earned.checked_add(points))
            .ok_or(PricingError::Overflow)?;

        priced.push(PricedLine {
            menu_item: item.uuid,
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: line.quantity,
            unit_price: item.price,
            unit_reward_points: item.reward_points,
        });
    }

    let redeemed_value = reward_points_redeemed
        .checked_mul(POINT_VALUE)
        .ok_or(PricingError::Overflow)?;

    let net_charge =
        total_price
            .checked_sub(redeemed_value)
            .ok_or(PricingError::RedemptionExceedsTotal {
                total_price,
                redeemed_value,
            })?;

    Ok(Quote {
        lines: priced,
        total_price,
        reward_points_earned,
        reward_points_redeemed,
        net_charge,
    })
}

/// Check a quote against a profile's balance and points.
///
/// Balance is checked before points.
///
/// # Errors
///
/// - [`SettlementError::InsufficientBalance`] when `balance` is below the net charge.
/// - [`SettlementError::InsufficientPoints`] when `reward_points` is below the redemption.
/// - [`SettlementError::Overflow`] when the resulting balances do not fit.
pub fn authorize(
    balance: i64,
    reward_points: u64,
    quote: &Quote,
) -> Result<Settlement, SettlementError> {
    // A charge beyond i64::MAX exceeds any balance.
    let net_charge =
        i64::try_from(quote.net_charge).map_err(|_| SettlementError::InsufficientBalance)?;

    if balance < net_charge {
        return Err(SettlementError::InsufficientBalance);
    }

    if reward_points < quote.reward_points_redeemed {
        return Err(SettlementError::InsufficientPoints);
    }

    let balance_after = balance
        .checked_sub(net_charge)
        .ok_or(SettlementError::Overflow)?;

    let points_after = (reward_points - quote.reward_points_redeemed)
        .checked_add(quote.reward_points_earned)
        .ok_or(SettlementError::Overflow)?;

    let earned = i64::try_from(quote.reward_points_earned).map_err(|_| SettlementError::Overflow)?;
    let redeemed =
        i64::try_from(quote.reward_points_redeemed).map_err(|_| SettlementError::Overflow)?;

    Ok(Settlement {
        balance_after,
        points_after,
        balance_delta: -net_charge,
        points_delta: earned - redeemed,
    })
}
