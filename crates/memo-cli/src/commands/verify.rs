use memo_core::gate::{VerifiedIdentity, UNAVAILABLE_BODY};
use memo_core::{MemoError, VerificationState, VerifyFailure};

use crate::app::AppContext;
use crate::cli::VerifyArgs;
use crate::errors::{from_core, CliError};
use crate::ui::{format_timestamp, print, receipt, Spinner, UiContext};

const RETRY_HINT: &str = "Hint: Run `memo verify` to try again.";
const PROVIDER_HINT: &str =
    "Hint: Open in World App, or set [provider] command or MEMO_PROVIDER to a bridge on PATH.";

pub async fn handle_verify(ctx: &AppContext<'_>, args: &VerifyArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None);
    let mut gate = ctx.mount_gate(&args.identity, args.signal.as_deref())?;

    if gate.is_open() {
        report_verified(ctx, &ui_ctx, gate.identity().as_ref(), true);
        return Ok(());
    }

    let spinner = Spinner::new(&ui_ctx, "Verifying with World ID");
    spinner.start();
    let state = gate.verify().await.clone();
    spinner.clear();

    match state {
        VerificationState::Ok => {
            report_verified(ctx, &ui_ctx, gate.identity().as_ref(), false);
            Ok(())
        }
        VerificationState::Unavailable => {
            Err(CliError::provider_unavailable(UNAVAILABLE_BODY, PROVIDER_HINT).into())
        }
        VerificationState::Error(failure) => Err(failure_error(&failure)),
        other => Err(anyhow::anyhow!("Verification ended in state {}", other)),
    }
}

fn failure_error(failure: &VerifyFailure) -> anyhow::Error {
    match failure {
        VerifyFailure::Configuration(_) => from_core(MemoError::from(failure)),
        other => CliError::VerificationRequired {
            message: other.message(),
            hint: other.is_retryable().then(|| RETRY_HINT.to_string()),
        }
        .into(),
    }
}

fn report_verified(
    ctx: &AppContext<'_>,
    ui_ctx: &UiContext,
    identity: Option<&VerifiedIdentity>,
    already: bool,
) {
    if ui_ctx.mode.is_json() {
        let value = serde_json::json!({
            "state": "ok",
            "alreadyVerified": already,
            "identity": identity,
        });
        println!("{}", value);
        return;
    }
    if ctx.quiet() {
        return;
    }

    let title = if already { "Already verified" } else { "Verified" };
    let timezone = ctx.timezone().ok().flatten();
    let pretty = ui_ctx.mode.is_pretty();
    let (level, when) = identity
        .map(|id| {
            (
                id.verification_level.as_str().to_string(),
                format_timestamp(id.verified_at, timezone, pretty),
            )
        })
        .unwrap_or_else(|| ("unknown".to_string(), "unknown".to_string()));
    print(
        ui_ctx,
        &receipt(ui_ctx, title, &[("Level", &level), ("Verified At", &when)]),
    );
}
