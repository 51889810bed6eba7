//! UTXO selection and value split arithmetic.

use thiserror::Error;

use crate::blockchain::types::{TxIn, TxOut, Utxo};

/// Problems turning UTXOs into transaction outputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("UTXO {tx_in} has non-numeric quantity {quantity:?}")]
    InvalidQuantity { tx_in: String, quantity: String },

    #[error("UTXO {0} carries native assets")]
    NativeAssets(String),

    #[error("Total input value overflows")]
    Overflow,

    #[error("Lower percent {0} is above 100")]
    InvalidPercent(u8),

    #[error("Fee {fee} exceeds higher output {available}")]
    FeeExceedsOutput { fee: u64, available: u64 },
}

/// First `threshold` UTXOs, or `None` while fewer have accumulated.
pub fn select_utxos(utxos: &[Utxo], threshold: usize) -> Option<&[Utxo]> {
    if threshold == 0 || utxos.len() < threshold {
        return None;
    }
    Some(&utxos[..threshold])
}

/// floor(total × percent / 100).
pub fn lower_share(total: u64, percent: u8) -> Result<u64, PlanError> {
    if percent > 100 {
        return Err(PlanError::InvalidPercent(percent));
    }
    u64::try_from(u128::from(total) * u128::from(percent) / 100).map_err(|_| PlanError::Overflow)
}

/// Inputs and the two outputs of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub tx_ins: Vec<TxIn>,
    pub total: u64,
    pub lower: TxOut,
    pub higher: TxOut,
}

impl SplitPlan {
    /// Sum the lovelace of `utxos` and divide it between the two addresses.
    pub fn new(
        utxos: &[Utxo],
        lower_address: &str,
        higher_address: &str,
        lower_percent: u8,
    ) -> Result<Self, PlanError> {
        let mut tx_ins = Vec::with_capacity(utxos.len());
        let mut total: u64 = 0;

        for utxo in utxos {
            let tx_in = utxo.reference();
            if utxo.has_native_assets() {
                return Err(PlanError::NativeAssets(tx_in.to_string()));
            }
            for asset in &utxo.amount {
                let quantity: u64 =
                    asset
                        .quantity
                        .parse()
                        .map_err(|_| PlanError::InvalidQuantity {
                            tx_in: tx_in.to_string(),
                            quantity: asset.quantity.clone(),
                        })?;
                total = total.checked_add(quantity).ok_or(PlanError::Overflow)?;
            }
            tx_ins.push(tx_in);
        }

        let lower = lower_share(total, lower_percent)?;
        let higher = total.checked_sub(lower).ok_or(PlanError::Overflow)?;
        Ok(Self {
            tx_ins,
            total,
            lower: TxOut::new(lower_address, lower),
            higher: TxOut::new(higher_address, higher),
        })
    }

    /// Outputs before the fee is known.
    pub fn outputs(&self) -> Vec<TxOut> {
        vec![self.lower.clone(), self.higher.clone()]
    }

    /// Outputs with `fee` taken from the higher output only.
    pub fn outputs_with_fee(&self, fee: u64) -> Result<Vec<TxOut>, PlanError> {
        let higher = self
            .higher
            .lovelace
            .checked_sub(fee)
            .ok_or(PlanError::FeeExceedsOutput {
                fee,
                available: self.higher.lovelace,
            })?;
        Ok(vec![
            self.lower.clone(),
            TxOut::new(self.higher.address.clone(), higher),
        ])
    }
}
