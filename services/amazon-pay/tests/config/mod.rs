use crate::mock::{verify, PEM, PEM_PKCS1};
use anyhow::Result;
use paysign_amazon_pay::canonical::string_to_sign;
use paysign_amazon_pay::{Client, Config, Environment, Region, SignatureAlgorithm};
use paysign_core::{Context, ErrorKind, StaticEnv, TlsVerification};
use paysign_file_read_tokio::TokioFileRead;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::PathBuf;
use test_case::test_case;

fn context(home_dir: Option<PathBuf>, envs: &[(&str, &str)]) -> Context {
    let env = StaticEnv {
        home_dir,
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    };
    Context::new().with_file_read(TokioFileRead).with_env(env)
}

#[test_case(PEM; "pkcs8")]
#[test_case(PEM_PKCS1; "pkcs1")]
#[tokio::test]
async fn test_private_key_from_file(pem: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("private.pem");
    tokio::fs::write(&path, pem).await.unwrap();

    let ctx = context(None, &[]);
    let cred = Config {
        public_key_id: Some("LIVE-AHEGSJCM3ZRVHP".to_string()),
        private_key_path: Some(path.to_string_lossy().to_string()),
        region: Some("uk".to_string()),
        ..Default::default()
    }
    .into_credential(&ctx)
    .await
    .unwrap();

    assert_eq!(cred.region(), Region::Eu);
    assert_eq!(cred.environment(), Environment::Unified);

    let client = Client::new(ctx, cred);
    let signature = client.generate_button_signature("{}").unwrap();
    let expected = string_to_sign(SignatureAlgorithm::Default, b"{}");
    assert!(verify(
        client.credential(),
        SignatureAlgorithm::Default,
        &expected,
        &signature,
    ));
}

#[tokio::test]
async fn test_private_key_path_in_home_dir() -> Result<()> {
    let home = tempfile::tempdir()?;
    tokio::fs::create_dir_all(home.path().join(".amazon-pay")).await?;
    tokio::fs::write(home.path().join(".amazon-pay/private.pem"), PEM).await?;

    let ctx = context(
        Some(home.path().to_path_buf()),
        &[
            ("AMAZON_PAY_PUBLIC_KEY_ID", "AHEGSJCM3ZRVHPLIVE"),
            ("AMAZON_PAY_PRIVATE_KEY_PATH", "~/.amazon-pay/private.pem"),
            ("AMAZON_PAY_REGION", "JP"),
        ],
    );

    let cred = Config::default().from_env(&ctx).into_credential(&ctx).await?;
    assert_eq!(cred.region(), Region::Jp);
    assert_eq!(cred.environment(), Environment::Live);
    assert_eq!(cred.endpoint().host(), "pay-api.amazon.jp");
    Ok(())
}

#[tokio::test]
async fn test_missing_private_key_file() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let err = Config {
        public_key_id: Some("LIVE-AHEGSJCM3ZRVHP".to_string()),
        private_key_path: Some(dir.path().join("absent.pem").to_string_lossy().to_string()),
        region: Some("na".to_string()),
        ..Default::default()
    }
    .into_credential(&context(None, &[]))
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    Ok(())
}

#[tokio::test]
async fn test_unknown_algorithm_rejected() -> Result<()> {
    let err = Config {
        public_key_id: Some("LIVE-AHEGSJCM3ZRVHP".to_string()),
        private_key: Some(PEM.to_string()),
        region: Some("na".to_string()),
        algorithm: Some("AMZN-PAY-RSASSA-PSS-V3".to_string()),
        ..Default::default()
    }
    .into_credential(&Context::new())
    .await
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}

#[tokio::test]
async fn test_override_service_url_relaxes_tls() -> Result<()> {
    let ctx = context(
        None,
        &[
            ("AMAZON_PAY_PUBLIC_KEY_ID", "SANDBOX-AHEGSJCM3ZRVHP"),
            ("AMAZON_PAY_PRIVATE_KEY", PEM),
            ("AMAZON_PAY_REGION", "na"),
            ("AMAZON_PAY_OVERRIDE_SERVICE_URL", "pay-api.amazon.com.devo"),
        ],
    );

    let cred = Config::default().from_env(&ctx).into_credential(&ctx).await?;
    assert_eq!(cred.endpoint().host(), "pay-api.amazon.com.devo");
    assert_eq!(
        cred.endpoint().tls_verification(),
        TlsVerification::AcceptInvalidCerts
    );

    let ctx = context(
        None,
        &[
            ("AMAZON_PAY_PUBLIC_KEY_ID", "SANDBOX-AHEGSJCM3ZRVHP"),
            ("AMAZON_PAY_PRIVATE_KEY", PEM),
            ("AMAZON_PAY_REGION", "na"),
        ],
    );
    let cred = Config::default().from_env(&ctx).into_credential(&ctx).await?;
    assert_eq!(cred.endpoint().host(), "pay-api.amazon.com");
    assert_eq!(cred.endpoint().tls_verification(), TlsVerification::Strict);
    Ok(())
}

#[tokio::test]
async fn test_credential_debug_is_redacted() -> Result<()> {
    let cred = Config {
        public_key_id: Some("LIVE-AHEGSJCM3ZRVHP".to_string()),
        private_key: Some(PEM.to_string()),
        region: Some("na".to_string()),
        ..Default::default()
    }
    .into_credential(&Context::new())
    .await?;

    let output = format!("{cred:?}");
    assert!(output.contains("PrivateKey(<redacted>)"), "{output}");
    assert!(!output.contains("AHEGSJCM3ZRVHP"), "{output}");
    Ok(())
}
