//! Tests for registration and login

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::Json;

    use crate::error::ServiceError;
    use crate::services::auth::{login, register, LoginRequest, RegisterRequest};
    use crate::test_support::test_state;

    fn register_request(account_number: &str) -> RegisterRequest {
        RegisterRequest {
            account_number: account_number.to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "pw".to_string(),
            account_type: "Cliente".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_a_token() {
        let state = test_state().await;

        let result = register(State(state.clone()), Json(register_request("111"))).await;
        assert!(result.is_ok());

        let result = login(
            State(state.clone()),
            Json(LoginRequest {
                account_number: "111".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_and_leaves_the_row_alone() {
        let state = test_state().await;

        register(State(state.clone()), Json(register_request("111")))
            .await
            .expect("first registration");
        let original = state.accounts.get("111").await.unwrap().unwrap();

        let mut second = register_request("111");
        second.password = "different".to_string();
        let result = register(State(state.clone()), Json(second)).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));

        let stored = state.accounts.get("111").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, original.password_hash);
    }

    #[tokio::test]
    async fn login_for_an_unknown_account_is_not_found() {
        let state = test_state().await;

        let result = login(
            State(state.clone()),
            Json(LoginRequest {
                account_number: "nobody".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn login_with_a_wrong_password_is_unauthenticated() {
        let state = test_state().await;
        register(State(state.clone()), Json(register_request("111")))
            .await
            .expect("registration");

        let result = login(
            State(state.clone()),
            Json(LoginRequest {
                account_number: "111".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn the_account_type_is_stored_as_given() {
        let state = test_state().await;

        let mut request = register_request("111");
        request.account_type = "Empresa".to_string();
        register(State(state.clone()), Json(request))
            .await
            .expect("registration");

        let stored = state.accounts.get("111").await.unwrap().unwrap();
        assert_eq!(stored.account_type, "Empresa");
    }
}
