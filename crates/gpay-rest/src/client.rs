//! GPay online wallet REST API client.

use crate::config::{normalize_language, ClientConfig};
use crate::error::GPayRestError;
use crate::responses::{
    self, SignedFields, BALANCE_FIELDS, OUTSTANDING_FIELDS, PAYMENT_REQUEST_FIELDS,
    PAYMENT_STATUS_FIELDS, SEND_MONEY_FIELDS, STATEMENT_FIELDS, WALLET_CHECK_FIELDS,
};
use auth::{
    ApiCredentials, RequestSigner, ResponseVerifier, SignableFields, SALT_HEADER,
    SIGNATURE_HEADER,
};
use common::GPayEnvironment;
use model::{
    Balance, OutstandingTransactions, PaymentRequest, PaymentStatus, SendMoneyResult, Statement,
    WalletCheck,
};
use rest_client::RestClient;
use rust_decimal::Decimal;
use serde_json::Value;

const AUTHORIZATION_HEADER: &str = "Authorization";
const LANGUAGE_HEADER: &str = "Accept-Language";

/// GPay wallet API client with request signing and response verification.
///
/// Every call signs its parameters, sends them as the JSON body, and
/// refuses to return data whose signature does not verify.
pub struct GPayRestClient {
    client: RestClient,
    credentials: ApiCredentials,
    config: ClientConfig,
}

impl GPayRestClient {
    /// Create a client for the staging environment with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, GPayRestError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with explicit settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(
        credentials: ApiCredentials,
        mut config: ClientConfig,
    ) -> Result<Self, GPayRestError> {
        config.language = normalize_language(Some(&config.language));
        let client = RestClient::new(config.rest_base_url(), config.timeout)?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    /// Build credentials and settings from `GPAY_*` environment variables.
    pub fn from_env() -> Result<Self, GPayRestError> {
        let credentials = ApiCredentials::from_env()?;
        let config = ClientConfig::from_env()?;
        Self::with_config(credentials, config)
    }

    /// Get the environment this client is connected to.
    pub fn environment(&self) -> GPayEnvironment {
        self.config.environment
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    // ========================================================================
    // Signed exchange
    // ========================================================================

    /// Sign `fields`, POST them, and return the verified `data` object.
    async fn call(
        &self,
        path: &str,
        mut fields: SignableFields,
        signed: &SignedFields,
    ) -> Result<Value, GPayRestError> {
        fields.insert("request_timestamp", common::now_ms().to_string());

        let signature = RequestSigner::new(&self.credentials)
            .with_encoding(self.config.request_encoding)
            .sign(&fields)?;

        let bearer = format!("Bearer {}", self.credentials.api_key());
        let headers = [
            (AUTHORIZATION_HEADER, bearer.as_str()),
            (LANGUAGE_HEADER, self.config.language.as_str()),
            (SALT_HEADER, signature.salt.as_str()),
            (SIGNATURE_HEADER, signature.signature.as_str()),
        ];

        tracing::debug!(path = %path, fields = fields.len(), "Sending signed request");

        let response = self.client.post_json(path, &fields, &headers).await?;
        let data = responses::take_data(response.json()?)?;

        let verifier =
            ResponseVerifier::new(&self.credentials).with_encoding(self.config.response_encoding);
        signed
            .extract(&data)
            .and_then(|response_fields| verifier.check(&response.headers, &response_fields))
            .map_err(|e| {
                tracing::warn!(path = %path, reason = %e, "Response verification failed");
                e
            })?;

        tracing::debug!(path = %path, "Response verified");
        Ok(data)
    }

    // ========================================================================
    // Account information
    // ========================================================================

    /// Get the current wallet balance.
    ///
    /// POST /info/balance
    pub async fn get_wallet_balance(&self) -> Result<Balance, GPayRestError> {
        let data = self
            .call("/info/balance", SignableFields::new(), &BALANCE_FIELDS)
            .await?;
        responses::balance(&data)
    }

    /// Get the statement for one day.
    ///
    /// POST /info/statement
    ///
    /// # Parameters
    /// - `date`: day in `YYYY-MM-DD` form
    pub async fn get_statement(&self, date: &str) -> Result<Statement, GPayRestError> {
        validate_date(date)?;

        let mut fields = SignableFields::new();
        fields.insert("date", date);

        let data = self.call("/info/statement", fields, &STATEMENT_FIELDS).await?;
        let statement = responses::statement(&data)?;

        tracing::info!(
            date = %date,
            transactions = statement.day_statement.len(),
            "Statement received"
        );

        Ok(statement)
    }

    /// Check whether a wallet exists and can receive money.
    ///
    /// POST /info/check-wallet
    pub async fn check_wallet(&self, wallet_gateway_id: &str) -> Result<WalletCheck, GPayRestError> {
        require_non_empty("wallet_gateway_id", wallet_gateway_id)?;

        let mut fields = SignableFields::new();
        fields.insert("wallet_gateway_id", wallet_gateway_id);

        let data = self
            .call("/info/check-wallet", fields, &WALLET_CHECK_FIELDS)
            .await?;
        responses::wallet_check(&data)
    }

    /// List transactions that have not settled yet.
    ///
    /// POST /info/outstanding-transactions
    pub async fn get_outstanding_transactions(
        &self,
    ) -> Result<OutstandingTransactions, GPayRestError> {
        let data = self
            .call(
                "/info/outstanding-transactions",
                SignableFields::new(),
                &OUTSTANDING_FIELDS,
            )
            .await?;
        responses::outstanding(&data)
    }

    // ========================================================================
    // Payments
    // ========================================================================

    /// Create a payment request for `amount`.
    ///
    /// POST /payment/create-payment-request
    ///
    /// # Parameters
    /// - `amount`: requested amount in LYD
    /// - `reference_no`: optional merchant reference
    /// - `description`: optional free text
    pub async fn create_payment_request(
        &self,
        amount: Decimal,
        reference_no: Option<&str>,
        description: Option<&str>,
    ) -> Result<PaymentRequest, GPayRestError> {
        let mut fields = SignableFields::new();
        fields
            .insert("amount", amount.to_string())
            .insert_opt("reference_no", reference_no)
            .insert_opt("description", description);

        tracing::info!(amount = %amount, "Creating payment request");

        let data = self
            .call(
                "/payment/create-payment-request",
                fields,
                &PAYMENT_REQUEST_FIELDS,
            )
            .await?;
        let request = responses::payment_request(&data)?;

        tracing::info!(request_id = %request.request_id, "Payment request created");

        Ok(request)
    }

    /// Check whether a payment request has been paid.
    ///
    /// POST /payment/check-payment-status
    pub async fn check_payment_status(
        &self,
        request_id: &str,
    ) -> Result<PaymentStatus, GPayRestError> {
        require_non_empty("request_id", request_id)?;

        let mut fields = SignableFields::new();
        fields.insert("request_id", request_id);

        let data = self
            .call(
                "/payment/check-payment-status",
                fields,
                &PAYMENT_STATUS_FIELDS,
            )
            .await?;
        responses::payment_status(&data)
    }

    /// Send money to another wallet.
    ///
    /// POST /payment/send-money
    ///
    /// # Parameters
    /// - `amount`: amount to send in LYD
    /// - `wallet_gateway_id`: recipient wallet
    /// - `reference_no`: optional merchant reference
    /// - `description`: optional free text
    pub async fn send_money(
        &self,
        amount: Decimal,
        wallet_gateway_id: &str,
        reference_no: Option<&str>,
        description: Option<&str>,
    ) -> Result<SendMoneyResult, GPayRestError> {
        require_non_empty("wallet_gateway_id", wallet_gateway_id)?;

        let mut fields = SignableFields::new();
        fields
            .insert("amount", amount.to_string())
            .insert("wallet_gateway_id", wallet_gateway_id)
            .insert_opt("reference_no", reference_no)
            .insert_opt("description", description);

        tracing::info!(
            amount = %amount,
            wallet_gateway_id = %wallet_gateway_id,
            "Sending money"
        );

        let data = self
            .call("/payment/send-money", fields, &SEND_MONEY_FIELDS)
            .await?;
        let result = responses::send_money(&data)?;

        tracing::info!(
            transaction_id = %result.transaction_id,
            new_balance = %result.new_balance,
            "Money sent"
        );

        Ok(result)
    }
}

impl std::fmt::Debug for GPayRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GPayRestClient")
            .field("environment", &self.config.environment)
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.credentials.api_key())
            .field("language", &self.config.language)
            .finish()
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), GPayRestError> {
    if value.trim().is_empty() {
        return Err(GPayRestError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Accept `YYYY-MM-DD` with a plausible month and day.
fn validate_date(date: &str) -> Result<(), GPayRestError> {
    let invalid = || GPayRestError::InvalidArgument(format!("date must be YYYY-MM-DD, got '{date}'"));

    let bytes = date.as_bytes();
    if !date.is_ascii() || bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }

    let number = |range: std::ops::Range<usize>| -> Result<u32, GPayRestError> {
        let part = &date[range];
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };

    let _year = number(0..4)?;
    let month = number(5..7)?;
    let day = number(8..10)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }
    Ok(())
}
