// Code generated by protoc-gen-decorate v0.1.0, DO NOT EDIT.
// source: test.proto
// package: us.xeserv.api

/// `HelloWorldLogging` is a middleware for `HelloWorld` that logs every failed call.
///
/// HelloWorld is a small greeting service.
#[derive(Debug, Clone)]
pub struct HelloWorldLogging<N, L> {
    next: N,
    sink: L,
}

impl<N, L> HelloWorldLogging<N, L> {
    pub fn new(next: N, sink: L) -> Self {
        Self { next, sink }
    }

    /// Loggable fields of `Words`, without sensitive fields.
    pub fn words_fields(message: &Words) -> ::decorgen_runtime::Fields {
        let mut fields = ::decorgen_runtime::Fields::new();
        fields.insert("words_message".to_string(), ::decorgen_runtime::FieldValue::from(message.message.as_str()));
        fields
    }

    /// Loggable fields of `LoginRequest`, without sensitive fields.
    pub fn login_request_fields(message: &LoginRequest) -> ::decorgen_runtime::Fields {
        let mut fields = ::decorgen_runtime::Fields::new();
        fields.insert("login_request_username".to_string(), ::decorgen_runtime::FieldValue::from(message.username.as_str()));
        fields.insert("login_request_count".to_string(), ::decorgen_runtime::FieldValue::from(message.count));
        fields
    }

    /// Loggable fields of `LoginResponse`, without sensitive fields.
    pub fn login_response_fields(message: &LoginResponse) -> ::decorgen_runtime::Fields {
        let mut fields = ::decorgen_runtime::Fields::new();
        fields.insert("login_response_session_id".to_string(), ::decorgen_runtime::FieldValue::from(message.session_id.as_str()));
        fields.insert("login_response_scopes".to_string(), ::decorgen_runtime::FieldValue::debug(&message.scopes));
        fields
    }
}

#[::decorgen_runtime::async_trait]
impl<N, L> HelloWorld for HelloWorldLogging<N, L>
where
    N: HelloWorld,
    L: ::decorgen_runtime::logging::LogSink,
{
    async fn speak(&self, ctx: &::decorgen_runtime::CallContext, input: Words) -> ::decorgen_runtime::CallResult<Words> {
        let ctx = ctx.with_fields([
            (::decorgen_runtime::logging::PACKAGE_FIELD, "us.xeserv.api"),
            (::decorgen_runtime::logging::SERVICE_FIELD, "HelloWorld"),
            (::decorgen_runtime::logging::METHOD_FIELD, "Speak"),
        ]);
        let payload = Self::words_fields(&input);
        ::decorgen_runtime::logging::observe(&self.sink, &ctx, payload, self.next.speak(&ctx, input)).await
    }

    async fn login(&self, ctx: &::decorgen_runtime::CallContext, input: LoginRequest) -> ::decorgen_runtime::CallResult<LoginResponse> {
        let ctx = ctx.with_fields([
            (::decorgen_runtime::logging::PACKAGE_FIELD, "us.xeserv.api"),
            (::decorgen_runtime::logging::SERVICE_FIELD, "HelloWorld"),
            (::decorgen_runtime::logging::METHOD_FIELD, "Login"),
        ]);
        let payload = Self::login_request_fields(&input);
        ::decorgen_runtime::logging::observe(&self.sink, &ctx, payload, self.next.login(&ctx, input)).await
    }
}

/// `AdminLogging` is a middleware for `Admin` that logs every failed call.
#[derive(Debug, Clone)]
pub struct AdminLogging<N, L> {
    next: N,
    sink: L,
}

impl<N, L> AdminLogging<N, L> {
    pub fn new(next: N, sink: L) -> Self {
        Self { next, sink }
    }

    /// Loggable fields of `super::common::Credentials`, without sensitive fields.
    pub fn us_xeserv_common_credentials_fields(message: &super::common::Credentials) -> ::decorgen_runtime::Fields {
        let mut fields = ::decorgen_runtime::Fields::new();
        fields.insert("credentials_user".to_string(), ::decorgen_runtime::FieldValue::from(message.user.as_str()));
        fields
    }

    /// Loggable fields of `Words`, without sensitive fields.
    pub fn words_fields(message: &Words) -> ::decorgen_runtime::Fields {
        let mut fields = ::decorgen_runtime::Fields::new();
        fields.insert("words_message".to_string(), ::decorgen_runtime::FieldValue::from(message.message.as_str()));
        fields
    }
}

#[::decorgen_runtime::async_trait]
impl<N, L> Admin for AdminLogging<N, L>
where
    N: Admin,
    L: ::decorgen_runtime::logging::LogSink,
{
    async fn rotate_credentials(&self, ctx: &::decorgen_runtime::CallContext, input: super::common::Credentials) -> ::decorgen_runtime::CallResult<Words> {
        let ctx = ctx.with_fields([
            (::decorgen_runtime::logging::PACKAGE_FIELD, "us.xeserv.api"),
            (::decorgen_runtime::logging::SERVICE_FIELD, "Admin"),
            (::decorgen_runtime::logging::METHOD_FIELD, "RotateCredentials"),
        ]);
        let payload = Self::us_xeserv_common_credentials_fields(&input);
        ::decorgen_runtime::logging::observe(&self.sink, &ctx, payload, self.next.rotate_credentials(&ctx, input)).await
    }
}
