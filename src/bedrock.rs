use crate::config::Config;
use crate::error::{Error, InferenceError, Result};
use crate::inference::{InvokeModel, CONTENT_TYPE};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use tokio::runtime::Runtime;
use tracing::{debug, info};

const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "ExpiredTokenException",
];

/// Bedrock Runtime client bound to one model.
///
/// The SDK is async, so this owns a current-thread runtime and blocks on each
/// call. Nothing else in the program needs an executor.
pub struct Bedrock {
    runtime: Runtime,
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl Bedrock {
    /// Resolves the named profile and region. Credentials are fetched lazily
    /// on the first call.
    pub fn connect(config: &Config) -> Result<Bedrock> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .profile_name(&config.profile)
                .region(Region::new(config.region.clone()))
                .load(),
        );
        info!(
            profile = %config.profile,
            region = %config.region,
            model = %config.model_id,
            "created bedrock session"
        );

        Ok(Self {
            runtime,
            client: aws_sdk_bedrockruntime::Client::new(&sdk_config),
            model_id: config.model_id.clone(),
        })
    }
}

impl InvokeModel for Bedrock {
    fn invoke_model(&self, body: Vec<u8>) -> Result<Vec<u8>, InferenceError> {
        let output = self
            .runtime
            .block_on(
                self.client
                    .invoke_model()
                    .model_id(&self.model_id)
                    .content_type(CONTENT_TYPE)
                    .accept(CONTENT_TYPE)
                    .body(Blob::new(body))
                    .send(),
            )
            .map_err(classify)?;

        debug!(content_type = output.content_type(), "model responded");
        Ok(output.body.into_inner())
    }
}

fn classify(err: SdkError<InvokeModelError>) -> InferenceError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ServiceError(context) => {
            let code = context.err().code().map(str::to_owned);
            if let InvokeModelError::AccessDeniedException(_) = context.err() {
                let code = code.unwrap_or_else(|| "AccessDeniedException".into());
                return InferenceError::Auth { code, message };
            }
            match code {
                Some(code) if AUTH_ERROR_CODES.contains(&code.as_str()) => {
                    InferenceError::Auth { code, message }
                }
                code => InferenceError::Rejected { code, message },
            }
        }
        _ => InferenceError::Transport(message),
    }
}
