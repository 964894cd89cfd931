//! Balance reconciliation.
//!
//! [`reconcile`] turns a draft [`BalanceSheet`] into one whose asset lines
//! equal its liability lines plus net assets. Missing aggregates are inferred
//! from the figures that are present and any residual is plugged into net
//! assets, the residual-claim line. Every change is recorded as an
//! [`Adjustment`] on the returned record.
//!
//! The steps run in a fixed order because later steps read figures written by
//! earlier ones:
//!
//! 1. fill total assets from the asset lines, else from the claims side;
//! 2. move unclassified assets into non-current assets;
//! 3. infer total liabilities from total assets and net assets;
//! 4. infer net assets from total assets and total liabilities;
//! 5. move unclassified liabilities into non-current liabilities;
//! 6. plug the remaining residual into net assets.

use tracing::debug;

use crate::record::{Adjustment, Amount, BalanceSheet};

/// Reconciles a draft balance sheet.
///
/// Never fails. The result satisfies [`BalanceSheet::is_balanced`] and
/// reconciling it again changes nothing. Arithmetic saturates at the bounds of
/// [`Amount`], so figures near those bounds may stay unbalanced.
#[must_use]
pub fn reconcile(mut bs: BalanceSheet) -> BalanceSheet {
    // 1. Total assets
    if bs.total_assets == 0 {
        let lines = bs.assets_side();
        if lines != 0 {
            bs.total_assets = lines;
            record(&mut bs, Adjustment::TotalAssetsFromLines { value: lines });
        } else {
            let liabilities = if bs.total_liabilities != 0 {
                bs.total_liabilities
            } else {
                bs.current_liabilities
                    .saturating_add(bs.non_current_liabilities)
            };
            let claims = liabilities.saturating_add(bs.net_assets);
            if claims != 0 {
                bs.total_assets = claims;
                record(&mut bs, Adjustment::TotalAssetsFromClaims { value: claims });
            }
        }
    }

    // 2. Asset lines against the total
    let lines = bs.assets_side();
    if lines < bs.total_assets {
        let by = bs.total_assets.saturating_sub(lines);
        bs.non_current_assets = bs.total_assets.saturating_sub(bs.current_assets);
        record(&mut bs, Adjustment::NonCurrentAssetsRaised { by });
    } else if lines > bs.total_assets {
        bs.total_assets = lines;
        record(&mut bs, Adjustment::TotalAssetsRaised { value: lines });
    }

    // 3. Total liabilities from net assets
    if bs.total_liabilities == 0 && bs.net_assets != 0 {
        let value = bs.total_assets.saturating_sub(bs.net_assets);
        if value != 0 {
            bs.total_liabilities = value;
            record(&mut bs, Adjustment::TotalLiabilitiesInferred { value });
        }
    }

    // 4. Net assets from total liabilities
    if bs.net_assets == 0 && bs.total_liabilities != 0 {
        let value = bs.total_assets.saturating_sub(bs.total_liabilities);
        if value != 0 {
            bs.net_assets = value;
            record(&mut bs, Adjustment::NetAssetsInferred { value });
        }
    }

    // 5. Liability lines against the total
    let lines = bs
        .current_liabilities
        .saturating_add(bs.non_current_liabilities);
    if lines < bs.total_liabilities {
        let by = bs.total_liabilities.saturating_sub(lines);
        bs.non_current_liabilities = bs
            .total_liabilities
            .saturating_sub(bs.current_liabilities);
        record(&mut bs, Adjustment::NonCurrentLiabilitiesRaised { by });
    } else if lines > bs.total_liabilities {
        bs.total_liabilities = lines;
        record(&mut bs, Adjustment::TotalLiabilitiesRaised { value: lines });
    }

    // 6. Plug
    let residual: Amount = bs.total_assets.saturating_sub(bs.claims_side());
    if residual != 0 {
        bs.net_assets = bs.net_assets.saturating_add(residual);
        record(&mut bs, Adjustment::NetAssetsPlugged { residual });
    }

    bs
}

fn record(bs: &mut BalanceSheet, adjustment: Adjustment) {
    debug!(entity = %bs.entity_name, ?adjustment, "Reconciliation adjustment");
    bs.adjustments.push(adjustment);
}
