use crate::chain_client::{ChainClient, PrivateKey};
use crate::config::ChainConfig;
use crate::error::WorkflowError;
use crate::workflow::{self, SetDnaRequest, SubmitStatus, Submitted};
use crate::render::ReadOutcome;
use serde::Serialize;

/// Input fields typed by the user.
#[derive(Debug, Clone, Default)]
pub struct PanelInputs {
    pub wallet: String,
    pub private_key: String,
    pub set_dna_item_id: String,
    pub set_dna_dna: String,
    pub get_dna_item_id: String,
    pub get_dna_address: String,
}

/// Output fields shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelOutputs {
    pub status: SubmitStatus,
    pub dna: String,
    pub items: String,
    pub last_error: Option<String>,
}

/// Binds the workflows to one set of input and output fields.
///
/// Actions take `&mut self`, so one panel never runs two of them at once.
pub struct Panel<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    config: &'a ChainConfig,
    pub inputs: PanelInputs,
    pub outputs: PanelOutputs,
}

impl<'a, C: ChainClient + ?Sized> Panel<'a, C> {
    pub fn new(client: &'a C, config: &'a ChainConfig) -> Self {
        Self {
            client,
            config,
            inputs: PanelInputs::default(),
            outputs: PanelOutputs::default(),
        }
    }

    /// Set DNA button.
    pub async fn set_dna(&mut self) -> Result<Submitted, WorkflowError> {
        self.outputs.last_error = None;
        let request = SetDnaRequest {
            wallet: self.inputs.wallet.clone(),
            private_key: PrivateKey::new(&self.inputs.private_key),
            item_id: self.inputs.set_dna_item_id.clone(),
            dna: self.inputs.set_dna_dna.clone(),
        };
        let status = &mut self.outputs.status;
        let result = workflow::set_dna(
            self.client,
            &self.config.item_manager,
            self.config.gas_price,
            &self.config.confirmation,
            &request,
            |s| *status = s,
        )
        .await;
        self.record(result)
    }

    /// Get DNA button. A failed read keeps the last value shown.
    pub async fn get_dna(&mut self) -> Result<ReadOutcome, WorkflowError> {
        self.outputs.last_error = None;
        let result = workflow::get_dna(
            self.client,
            &self.config.item_manager,
            &self.inputs.get_dna_item_id,
            &self.inputs.get_dna_address,
        )
        .await;
        if let Ok(outcome) = &result {
            self.outputs.dna = outcome.to_string();
        }
        self.record(result)
    }

    /// Get Items button. Reads the items of the address in the Get DNA address field.
    pub async fn get_items(&mut self) -> Result<ReadOutcome, WorkflowError> {
        self.outputs.last_error = None;
        let result = workflow::get_items(
            self.client,
            &self.config.ownership,
            &self.inputs.get_dna_address,
        )
        .await;
        if let Ok(outcome) = &result {
            self.outputs.items = outcome.to_string();
        }
        self.record(result)
    }

    fn record<T>(&mut self, result: Result<T, WorkflowError>) -> Result<T, WorkflowError> {
        if let Err(e) = &result {
            self.outputs.last_error = Some(e.to_string());
        }
        result
    }
}
