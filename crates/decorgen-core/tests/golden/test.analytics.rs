// Code generated by protoc-gen-decorate v0.1.0, DO NOT EDIT.
// source: test.proto
// package: us.xeserv.api

/// `HelloWorldAnalytics` is a middleware for `HelloWorld` that submits one analytics event per call.
///
/// HelloWorld is a small greeting service.
#[derive(Debug, Clone)]
pub struct HelloWorldAnalytics<N, C> {
    next: N,
    client: C,
}

impl<N, C> HelloWorldAnalytics<N, C> {
    pub fn new(next: N, client: C) -> Self {
        Self { next, client }
    }
}

#[::decorgen_runtime::async_trait]
impl<N, C> HelloWorld for HelloWorldAnalytics<N, C>
where
    N: HelloWorld,
    C: ::decorgen_runtime::analytics::EventSink,
{
    async fn speak(&self, ctx: &::decorgen_runtime::CallContext, input: Words) -> ::decorgen_runtime::CallResult<Words> {
        ::decorgen_runtime::analytics::track(&self.client, ctx, "HelloWorld Speak", self.next.speak(ctx, input)).await
    }

    async fn login(&self, ctx: &::decorgen_runtime::CallContext, input: LoginRequest) -> ::decorgen_runtime::CallResult<LoginResponse> {
        ::decorgen_runtime::analytics::track(&self.client, ctx, "HelloWorld Login", self.next.login(ctx, input)).await
    }
}

/// `AdminAnalytics` is a middleware for `Admin` that submits one analytics event per call.
#[derive(Debug, Clone)]
pub struct AdminAnalytics<N, C> {
    next: N,
    client: C,
}

impl<N, C> AdminAnalytics<N, C> {
    pub fn new(next: N, client: C) -> Self {
        Self { next, client }
    }
}

#[::decorgen_runtime::async_trait]
impl<N, C> Admin for AdminAnalytics<N, C>
where
    N: Admin,
    C: ::decorgen_runtime::analytics::EventSink,
{
    async fn rotate_credentials(&self, ctx: &::decorgen_runtime::CallContext, input: super::common::Credentials) -> ::decorgen_runtime::CallResult<Words> {
        ::decorgen_runtime::analytics::track(&self.client, ctx, "Admin RotateCredentials", self.next.rotate_credentials(ctx, input)).await
    }
}
