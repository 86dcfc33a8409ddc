use crate::repository::profiles::RegisterForm;

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let form: RegisterForm =
        crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(
        state
            .repository
            .register(form)
            .await
            .map(|profile| crate::handlers::created(&profile)),
    )
}
