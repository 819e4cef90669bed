use serde::Deserialize;

/// Body of `POST /api/start`. The wager is optional; a missing field is a
/// zero bet.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub bet_amount: u64,
}

/// Query string of `POST /api/insurance`. The response token is forwarded
/// to the engine untouched; absent means empty.
#[derive(Debug, Default, Deserialize)]
pub struct InsuranceParams {
    #[serde(default)]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_reads_camel_case() {
        let req: StartRequest = serde_json::from_str(r#"{"betAmount": 25}"#).unwrap();
        assert_eq!(req.bet_amount, 25);
    }

    #[test]
    fn test_start_request_defaults_missing_bet() {
        let req: StartRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.bet_amount, 0);
    }

    #[test]
    fn test_start_request_rejects_negative_bet() {
        assert!(serde_json::from_str::<StartRequest>(r#"{"betAmount": -5}"#).is_err());
    }
}
