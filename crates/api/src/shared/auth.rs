use crate::error::NudgeError;
use actix_web::HttpRequest;
use nudge_infra::NudgeContext;

pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Rejects the request unless it carries the configured cron secret.
/// Every request is let through when no secret is configured.
pub fn protect_cron_route(req: &HttpRequest, ctx: &NudgeContext) -> Result<(), NudgeError> {
    let expected = match &ctx.config.cron_secret {
        Some(secret) => secret,
        None => return Ok(()),
    };

    let provided = match req.headers().get(CRON_SECRET_HEADER) {
        Some(secret) => match secret.to_str() {
            Ok(secret) => secret,
            Err(_) => {
                return Err(NudgeError::Unauthorized(
                    "Malformed secret provided".to_string(),
                ))
            }
        },
        None => {
            return Err(NudgeError::Unauthorized(format!(
                "Unable to find secret in {} header",
                CRON_SECRET_HEADER
            )))
        }
    };

    if !secrets_match(provided.as_bytes(), expected.as_bytes()) {
        return Err(NudgeError::Unauthorized(format!(
            "Invalid secret provided in {} header",
            CRON_SECRET_HEADER
        )));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    fn ctx_with_secret(secret: Option<&str>) -> NudgeContext {
        let mut ctx = NudgeContext::create_inmemory();
        ctx.config.cron_secret = secret.map(String::from);
        ctx
    }

    #[test]
    fn accepts_matching_secret() {
        let ctx = ctx_with_secret(Some("s3cret"));
        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "s3cret"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());
    }

    #[test]
    fn rejects_wrong_or_missing_secret() {
        let ctx = ctx_with_secret(Some("s3cret"));
        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "s3cre"))
            .to_http_request();
        assert!(matches!(
            protect_cron_route(&req, &ctx),
            Err(NudgeError::Unauthorized(_))
        ));

        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "s3creT"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());
    }

    #[test]
    fn open_when_no_secret_is_configured() {
        let ctx = ctx_with_secret(None);
        let req = TestRequest::default().to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "anything"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());
    }
}
