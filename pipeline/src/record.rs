//! Normalized transaction records, and the builder that assembles them column by column.

use serde::Serialize;

use crate::error::NormalizeError;

/// Output field of a [TransactionRecord], in output order.
///
/// The string form of each field is its CSV column name.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumCount,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
pub enum Field {
    #[strum(serialize = "Transaction ID")]
    TransactionId,
    #[strum(serialize = "Execution date")]
    ExecutionDate,
    #[strum(serialize = "Transaction type")]
    TransactionType,
    #[strum(serialize = "Quantity")]
    Quantity,
    #[strum(serialize = "Order type")]
    OrderType,
    #[strum(serialize = "Execution price")]
    ExecutionPrice,
    #[strum(serialize = "Execution price currency")]
    ExecutionPriceCurrency,
    #[strum(serialize = "Option execution cost")]
    OptionExecutionCost,
    #[strum(serialize = "Option execution cost currency")]
    OptionExecutionCostCurrency,
    #[strum(serialize = "Taxes")]
    Taxes,
    #[strum(serialize = "Taxes currency")]
    TaxesCurrency,
    #[strum(serialize = "Fees")]
    Fees,
    #[strum(serialize = "Fees currency")]
    FeesCurrency,
    #[strum(serialize = "Net proceeds")]
    NetProceeds,
    #[strum(serialize = "Net proceeds currency")]
    NetProceedsCurrency,
    #[strum(serialize = "Net proceeds units")]
    NetProceedsUnits,
}

/// A single normalized transaction.
///
/// Serializes to one CSV row, with columns named and ordered as in [Field].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,
    /// Kept exactly as rendered in the statement.
    #[serde(rename = "Execution date")]
    pub execution_date: String,
    #[serde(rename = "Transaction type")]
    pub transaction_type: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    /// Only present for transactions that were placed as orders.
    #[serde(rename = "Order type")]
    pub order_type: Option<String>,
    #[serde(rename = "Execution price")]
    pub execution_price: f64,
    #[serde(rename = "Execution price currency")]
    pub execution_price_currency: String,
    #[serde(rename = "Option execution cost")]
    pub option_execution_cost: f64,
    #[serde(rename = "Option execution cost currency")]
    pub option_execution_cost_currency: String,
    #[serde(rename = "Taxes")]
    pub taxes: f64,
    #[serde(rename = "Taxes currency")]
    pub taxes_currency: String,
    /// Absent when the table ends on a tax entry with no fee entry after it.
    #[serde(rename = "Fees")]
    pub fees: Option<f64>,
    #[serde(rename = "Fees currency")]
    pub fees_currency: Option<String>,
    /// Set together with `net_proceeds_currency`, never together with `net_proceeds_units`.
    #[serde(rename = "Net proceeds")]
    pub net_proceeds: Option<f64>,
    #[serde(rename = "Net proceeds currency")]
    pub net_proceeds_currency: Option<String>,
    #[serde(rename = "Net proceeds units")]
    pub net_proceeds_units: Option<f64>,
}

/// A numeric value in a currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub currency: String,
}

impl Amount {
    pub fn new<S: Into<String>>(value: f64, currency: S) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

/// What a transaction's entry in the "Cash / Units" column turned out to be.
#[derive(Clone, Debug, PartialEq)]
pub enum NetProceeds {
    Cash(Amount),
    Units(f64),
}

/// Collects the values of each output field independently, one column at a time.
///
/// Nothing ties the n-th value of one field to the n-th value of another until [Self::build],
/// which refuses to pair them up unless every field has the same number of values.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    transaction_ids: Vec<String>,
    execution_dates: Vec<String>,
    transaction_types: Vec<String>,
    quantities: Vec<f64>,
    order_types: Vec<Option<String>>,
    execution_prices: Vec<Amount>,
    option_execution_costs: Vec<Amount>,
    taxes: Vec<Amount>,
    fees: Vec<Option<Amount>>,
    net_proceeds: Vec<NetProceeds>,
}

impl RecordBuilder {
    pub fn push_transaction_id(&mut self, id: String) {
        self.transaction_ids.push(id);
    }

    pub fn push_execution_date(&mut self, date: String) {
        self.execution_dates.push(date);
    }

    pub fn push_type_and_quantity(&mut self, transaction_type: String, quantity: f64) {
        self.transaction_types.push(transaction_type);
        self.quantities.push(quantity);
    }

    pub fn push_order_type(&mut self, order_type: Option<String>) {
        self.order_types.push(order_type);
    }

    pub fn push_price_and_cost(&mut self, execution_price: Amount, option_execution_cost: Amount) {
        self.execution_prices.push(execution_price);
        self.option_execution_costs.push(option_execution_cost);
    }

    pub fn push_tax(&mut self, tax: Amount) {
        self.taxes.push(tax);
    }

    pub fn push_fee(&mut self, fee: Option<Amount>) {
        self.fees.push(fee);
    }

    pub fn push_net_proceeds(&mut self, net_proceeds: NetProceeds) {
        self.net_proceeds.push(net_proceeds);
    }

    /// Number of values collected so far for every output field, in [Field] order.
    pub fn lengths(&self) -> Vec<(Field, usize)> {
        vec![
            (Field::TransactionId, self.transaction_ids.len()),
            (Field::ExecutionDate, self.execution_dates.len()),
            (Field::TransactionType, self.transaction_types.len()),
            (Field::Quantity, self.quantities.len()),
            (Field::OrderType, self.order_types.len()),
            (Field::ExecutionPrice, self.execution_prices.len()),
            (Field::ExecutionPriceCurrency, self.execution_prices.len()),
            (Field::OptionExecutionCost, self.option_execution_costs.len()),
            (Field::OptionExecutionCostCurrency, self.option_execution_costs.len()),
            (Field::Taxes, self.taxes.len()),
            (Field::TaxesCurrency, self.taxes.len()),
            (Field::Fees, self.fees.len()),
            (Field::FeesCurrency, self.fees.len()),
            (Field::NetProceeds, self.net_proceeds.len()),
            (Field::NetProceedsCurrency, self.net_proceeds.len()),
            (Field::NetProceedsUnits, self.net_proceeds.len()),
        ]
    }

    /// Pairs up the collected values into records.
    ///
    /// Fails with [NormalizeError::LengthMismatch] if the fields have different lengths.
    pub fn build(self) -> Result<Vec<TransactionRecord>, NormalizeError> {
        let lengths = self.lengths();
        if lengths.windows(2).any(|pair| pair[0].1 != pair[1].1) {
            return Err(NormalizeError::LengthMismatch { lengths });
        }

        let records = self
            .transaction_ids
            .into_iter()
            .zip(self.execution_dates)
            .zip(self.transaction_types.into_iter().zip(self.quantities))
            .zip(self.order_types)
            .zip(self.execution_prices.into_iter().zip(self.option_execution_costs))
            .zip(self.taxes.into_iter().zip(self.fees))
            .zip(self.net_proceeds)
            .map(|(((((ids, types), order_type), (price, cost)), (tax, fee)), net_proceeds)| {
                let (transaction_id, execution_date) = ids;
                let (transaction_type, quantity) = types;
                let (fees, fees_currency) = match fee {
                    Some(fee) => (Some(fee.value), Some(fee.currency)),
                    None => (None, None),
                };
                let (net_proceeds, net_proceeds_currency, net_proceeds_units) =
                    match net_proceeds {
                        NetProceeds::Cash(cash) => (Some(cash.value), Some(cash.currency), None),
                        NetProceeds::Units(units) => (None, None, Some(units)),
                    };
                TransactionRecord {
                    transaction_id,
                    execution_date,
                    transaction_type,
                    quantity,
                    order_type,
                    execution_price: price.value,
                    execution_price_currency: price.currency,
                    option_execution_cost: cost.value,
                    option_execution_cost_currency: cost.currency,
                    taxes: tax.value,
                    taxes_currency: tax.currency,
                    fees,
                    fees_currency,
                    net_proceeds,
                    net_proceeds_currency,
                    net_proceeds_units,
                }
            })
            .collect();

        Ok(records)
    }
}
