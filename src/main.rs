use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use physiobook::config::AppConfig;
use physiobook::handlers;
use physiobook::services::booking_sink::{BookingSink, ClinicNotifySink, LogBookingSink};
use physiobook::services::clock::SystemClock;
use physiobook::services::messaging::twilio::TwilioSmsProvider;
use physiobook::services::otp::sms::SmsOtpProvider;
use physiobook::services::otp::{FixedCodeOtpProvider, OtpProvider};
use physiobook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let otp: Arc<dyn OtpProvider> = match config.otp_provider.as_str() {
        "sms" => {
            anyhow::ensure!(
                config.twilio_configured(),
                "TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER must be set when OTP_PROVIDER=sms"
            );
            tracing::info!("sending verification codes by SMS");
            Arc::new(SmsOtpProvider::new(
                Box::new(TwilioSmsProvider::from_config(&config)),
                config.clinic_name.clone(),
                config.otp_code.clone(),
            ))
        }
        "fixed" => {
            tracing::info!("using fixed verification code, nothing is sent");
            Arc::new(FixedCodeOtpProvider::new(config.otp_code.clone()))
        }
        other => anyhow::bail!("unknown OTP_PROVIDER: {other}"),
    };

    let sink: Arc<dyn BookingSink> = if !config.clinic_phone.is_empty() && config.twilio_configured() {
        tracing::info!(clinic_phone = %config.clinic_phone, "bookings will be texted to the clinic");
        Arc::new(ClinicNotifySink::new(
            Box::new(TwilioSmsProvider::from_config(&config)),
            config.clinic_phone.clone(),
        ))
    } else {
        Arc::new(LogBookingSink)
    };

    let state = Arc::new(AppState::new(
        config.clone(),
        otp,
        sink,
        Arc::new(SystemClock),
    ));

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
