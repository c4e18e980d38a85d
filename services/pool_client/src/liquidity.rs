//! Add-liquidity workflow
//!
//! Holds the two amount fields of the deposit form. Editing the token A field
//! bumps a revision; a quote for token B is applied only if the revision has
//! not moved since the quote was requested, so slow responses never overwrite
//! newer input.
//!
//! Submission is gated by the ratio check over the latest reserve snapshot.
//! Missing reserves or unparsable input do not block; only a completed
//! comparison outside tolerance does.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use swap_amm::{
    quote_matching_amount, spot_price, DepositCheck, DepositVerdict, RatioValidator,
};
use swap_types::{format_units, parse_units, Address, DepositProposal, U256};
use tracing::{debug, info, warn};

use crate::chain::{wait_for_receipt, ContractCall, PoolChain, ReceiptWait, TxReceipt};
use crate::errors::{ClientError, Result};
use crate::pools::PoolHandle;
use crate::reserves::ReserveTracker;

/// Where a token B quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    /// The pool's `liquidityQuote`
    Contract,
    /// Computed locally from the latest reserves
    Reserves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub amount_b: U256,
    pub source: QuoteSource,
    pub revision: u64,
}

/// What the form should tell the user about the amounts to enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiquidityMode {
    /// Empty pool: the first deposit sets the price
    Seeding,
    /// Funded pool: deposits must keep the ratio, shown as one whole A in B
    Proportional { price: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormState {
    amount_a: String,
    amount_b: String,
    revision: u64,
}

pub struct AddLiquidity {
    chain: Arc<dyn PoolChain>,
    tracker: Arc<ReserveTracker>,
    handle: PoolHandle,
    check: DepositCheck,
    wait: ReceiptWait,
    form: Mutex<FormState>,
}

impl fmt::Display for LiquidityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquidityMode::Seeding => {
                write!(f, "Pool is empty: provide equal amounts of both tokens")
            }
            LiquidityMode::Proportional { price } => {
                write!(f, "Maintain the current ratio: {}", price)
            }
        }
    }
}

impl AddLiquidity {
    pub fn new(
        chain: Arc<dyn PoolChain>,
        tracker: Arc<ReserveTracker>,
        handle: PoolHandle,
        validator: RatioValidator,
        wait: ReceiptWait,
    ) -> Self {
        let check = DepositCheck::new(validator, handle.decimals_a, handle.decimals_b);
        Self {
            chain,
            tracker,
            handle,
            check,
            wait,
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn handle(&self) -> &PoolHandle {
        &self.handle
    }

    // The lock is never held across an await
    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current `(amount_a, amount_b)` field contents
    pub fn amounts(&self) -> (String, String) {
        let form = self.form();
        (form.amount_a.clone(), form.amount_b.clone())
    }

    pub fn revision(&self) -> u64 {
        self.form().revision
    }

    /// Edit the token A field; returns the new revision
    ///
    /// Blank or non-positive input clears token B, since nothing can be quoted.
    pub fn set_amount_a(&self, input: &str) -> u64 {
        let clears_b = self.positive_amount_a(input).is_none();
        let mut form = self.form();
        form.amount_a = input.to_string();
        form.revision += 1;
        if clears_b {
            form.amount_b.clear();
        }
        form.revision
    }

    /// Edit the token B field by hand
    pub fn set_amount_b(&self, input: &str) {
        self.form().amount_b = input.to_string();
    }

    fn positive_amount_a(&self, input: &str) -> Option<U256> {
        parse_units(input, self.handle.decimals_a)
            .ok()
            .filter(|amount| !amount.is_zero())
    }

    /// Quote token B for the current token A field and fill it in
    ///
    /// Asks the pool first and falls back to the latest reserves. Returns
    /// `None` when there is nothing to quote, no quote is possible, or the
    /// field changed while the quote was in flight.
    pub async fn refresh_quote(&self) -> Result<Option<Quote>> {
        let (input, revision) = {
            let form = self.form();
            (form.amount_a.clone(), form.revision)
        };
        let Some(amount_a) = self.positive_amount_a(&input) else {
            return Ok(None);
        };

        let quoted = match self.chain.liquidity_quote(self.handle.pool, amount_a).await {
            Ok(amount_b) => Some((amount_b, QuoteSource::Contract)),
            Err(e) => {
                warn!("Liquidity quote failed, using reserves: {}", e);
                self.tracker
                    .reserves_for(self.handle.pool)
                    .filter(|reserves| reserves.is_funded())
                    .and_then(|reserves| quote_matching_amount(&reserves, amount_a).ok())
                    .map(|amount_b| (amount_b, QuoteSource::Reserves))
            }
        };
        let Some((amount_b, source)) = quoted else {
            return Ok(None);
        };

        let mut form = self.form();
        if form.revision != revision {
            debug!(
                "Ignoring quote for revision {} (form at {})",
                revision, form.revision
            );
            return Ok(None);
        }
        form.amount_b = format_units(amount_b, self.handle.decimals_b);
        debug!("Quoted {} for {} ({:?})", form.amount_b, input, source);

        Ok(Some(Quote {
            amount_b,
            source,
            revision,
        }))
    }

    /// Ratio check of the current fields against the latest reserves
    pub fn ratio_verdict(&self) -> DepositVerdict {
        let (amount_a, amount_b) = self.amounts();
        let reserves = self.tracker.reserves_for(self.handle.pool);
        self.check.evaluate(reserves.as_ref(), &amount_a, &amount_b)
    }

    /// Hint for the form, once reserves are known
    pub fn mode(&self) -> Option<LiquidityMode> {
        let reserves = self.tracker.reserves_for(self.handle.pool)?;
        if reserves.is_empty() {
            return Some(LiquidityMode::Seeding);
        }
        let price = spot_price(&reserves, self.handle.decimals_a).ok()?;
        Some(LiquidityMode::Proportional {
            price: format!(
                "1 {} = {} {}",
                self.handle.token_a.symbol,
                format_units(price, self.handle.decimals_b),
                self.handle.token_b.symbol
            ),
        })
    }

    /// Approve both tokens and add the current amounts to the pool
    ///
    /// The form is cleared and reserves refreshed once the deposit is mined.
    pub async fn submit(&self, from: Address) -> Result<TxReceipt> {
        let (amount_a, amount_b) = self.amounts();
        if amount_a.trim().is_empty() || amount_b.trim().is_empty() {
            return Err(ClientError::MissingAmount);
        }
        let proposal = DepositProposal::parse(
            &amount_a,
            &amount_b,
            self.handle.decimals_a,
            self.handle.decimals_b,
        )?;
        if proposal.amount_a.is_zero() || proposal.amount_b.is_zero() {
            return Err(ClientError::ZeroAmount);
        }

        if let DepositVerdict::OutOfTolerance(check) = self.ratio_verdict() {
            return Err(ClientError::RatioOutOfTolerance {
                deviation: check.deviation_percent(),
                tolerance: self.check.validator().tolerance().as_percent(),
            });
        }

        let pool = self.handle.pool;
        self.chain
            .send(
                from,
                ContractCall::Approve {
                    token: self.handle.token_a.address,
                    spender: pool,
                    amount: proposal.amount_a,
                },
            )
            .await?;
        self.chain
            .send(
                from,
                ContractCall::Approve {
                    token: self.handle.token_b.address,
                    spender: pool,
                    amount: proposal.amount_b,
                },
            )
            .await?;
        let hash = self
            .chain
            .send(
                from,
                ContractCall::AddLiquidity {
                    pool,
                    amount_a: proposal.amount_a,
                    amount_b: proposal.amount_b,
                },
            )
            .await?;

        let receipt = wait_for_receipt(self.chain.as_ref(), hash, self.wait).await?;
        info!(
            "Added {} {} and {} {} to {:?}",
            amount_a, self.handle.token_a.symbol, amount_b, self.handle.token_b.symbol, pool
        );

        {
            let mut form = self.form();
            form.amount_a.clear();
            form.amount_b.clear();
            form.revision += 1;
        }
        if let Err(e) = self.tracker.refresh_pool(self.handle.pool).await {
            warn!("Reserve refresh after deposit failed: {}", e);
        }

        Ok(receipt)
    }
}
