//! Monthly returns of the momentum decile portfolios.

use crate::columns::momentum::{
    DECILE, DM_DECILE, DM_RET, KRF_DECILE, KRF_RET, LAG_MKT_CAP, RET, RF,
};
use crate::columns::{MONTH, YEAR};
use crate::construction::validate_columns;
use crate::error::Result;
use crate::weighting::{Weighting, valid_weight};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for decile portfolio returns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecileReturnConfig {
    /// Weighting inside each decile (default: value)
    pub weighting: Weighting,
}

fn policy_returns(panel: &DataFrame, label: &str, alias: &str, weighting: Weighting) -> LazyFrame {
    let labelled = panel.clone().lazy().filter(col(label).is_not_null());
    let members = match weighting {
        Weighting::Value => labelled.filter(valid_weight(LAG_MKT_CAP)),
        Weighting::Equal => labelled,
    };
    members
        .with_column(col(label).alias(DECILE))
        .group_by([col(YEAR), col(MONTH), col(DECILE)])
        .agg([weighting.aggregate(RET, LAG_MKT_CAP).alias(alias)])
}

/// Decile portfolio returns under both breakpoint policies.
///
/// `panel` is the output of [`assign_deciles`](crate::assign_deciles) and
/// `factors` the loaded Fama-French file, which supplies `rf`. A
/// (month, decile) present under only one policy has a null return under the
/// other.
///
/// Output: `year, month, decile, dm_ret, krf_ret, rf`, sorted by month and
/// decile.
pub fn decile_returns(
    panel: &DataFrame,
    factors: &DataFrame,
    config: &DecileReturnConfig,
) -> Result<DataFrame> {
    validate_columns(
        panel,
        &[YEAR, MONTH, RET, LAG_MKT_CAP, DM_DECILE, KRF_DECILE],
        "momentum_returns",
    )?;
    validate_columns(factors, &[YEAR, MONTH, RF], "momentum_returns")?;

    let keys = || [col(YEAR), col(MONTH), col(DECILE)];
    let dm = policy_returns(panel, DM_DECILE, DM_RET, config.weighting);
    let krf = policy_returns(panel, KRF_DECILE, KRF_RET, config.weighting);
    let rf = factors.clone().lazy().select([col(YEAR), col(MONTH), col(RF)]);

    let out = dm
        .join(
            krf,
            keys(),
            keys(),
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .join(
            rf,
            [col(YEAR), col(MONTH)],
            [col(YEAR), col(MONTH)],
            JoinArgs::new(JoinType::Left),
        )
        .select([
            col(YEAR),
            col(MONTH),
            col(DECILE),
            col(DM_RET),
            col(KRF_RET),
            col(RF),
        ])
        .sort([YEAR, MONTH, DECILE], Default::default())
        .collect()?;

    debug!(
        "momentum decile returns ({} weighted): {} rows",
        config.weighting,
        out.height()
    );
    Ok(out)
}
