use crate::api::ApiResult;
use crate::models::UserRole;
use crate::util::dashboard_for;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ConsentDecision {
    Accept,
    Decline,
}

/// Where the browser goes after the consent screen. Acceptance follows the
/// backend's `redirect_to`; decline or any failure lands on the role's
/// dashboard.
pub(crate) fn consent_target(
    decision: ConsentDecision,
    accept_result: Option<ApiResult<String>>,
    role: Option<UserRole>,
) -> String {
    match (decision, accept_result) {
        (ConsentDecision::Accept, Some(Ok(redirect_to))) if !redirect_to.is_empty() => redirect_to,
        _ => dashboard_for(role).to_string(),
    }
}

/// `consent_challenge` from a `?a=b&c=d` query string.
pub(crate) fn challenge_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "consent_challenge")
        .and_then(|(_, v)| urlencoding::decode(v).ok())
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}
