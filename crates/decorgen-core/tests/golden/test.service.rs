// Code generated by protoc-gen-decorate v0.1.0, DO NOT EDIT.
// source: test.proto
// package: us.xeserv.api

/// HelloWorld is a small greeting service.
#[::decorgen_runtime::async_trait]
pub trait HelloWorld: Send + Sync {
    /// Speak echoes the given words.
    async fn speak(&self, ctx: &::decorgen_runtime::CallContext, input: Words) -> ::decorgen_runtime::CallResult<Words>;

    async fn login(&self, ctx: &::decorgen_runtime::CallContext, input: LoginRequest) -> ::decorgen_runtime::CallResult<LoginResponse>;
}

#[::decorgen_runtime::async_trait]
impl<T: HelloWorld + ?Sized> HelloWorld for ::std::sync::Arc<T> {
    async fn speak(&self, ctx: &::decorgen_runtime::CallContext, input: Words) -> ::decorgen_runtime::CallResult<Words> {
        (**self).speak(ctx, input).await
    }

    async fn login(&self, ctx: &::decorgen_runtime::CallContext, input: LoginRequest) -> ::decorgen_runtime::CallResult<LoginResponse> {
        (**self).login(ctx, input).await
    }
}

#[::decorgen_runtime::async_trait]
impl<T: HelloWorld + ?Sized> HelloWorld for ::std::boxed::Box<T> {
    async fn speak(&self, ctx: &::decorgen_runtime::CallContext, input: Words) -> ::decorgen_runtime::CallResult<Words> {
        (**self).speak(ctx, input).await
    }

    async fn login(&self, ctx: &::decorgen_runtime::CallContext, input: LoginRequest) -> ::decorgen_runtime::CallResult<LoginResponse> {
        (**self).login(ctx, input).await
    }
}

#[::decorgen_runtime::async_trait]
pub trait Admin: Send + Sync {
    async fn rotate_credentials(&self, ctx: &::decorgen_runtime::CallContext, input: super::common::Credentials) -> ::decorgen_runtime::CallResult<Words>;
}

#[::decorgen_runtime::async_trait]
impl<T: Admin + ?Sized> Admin for ::std::sync::Arc<T> {
    async fn rotate_credentials(&self, ctx: &::decorgen_runtime::CallContext, input: super::common::Credentials) -> ::decorgen_runtime::CallResult<Words> {
        (**self).rotate_credentials(ctx, input).await
    }
}

#[::decorgen_runtime::async_trait]
impl<T: Admin + ?Sized> Admin for ::std::boxed::Box<T> {
    async fn rotate_credentials(&self, ctx: &::decorgen_runtime::CallContext, input: super::common::Credentials) -> ::decorgen_runtime::CallResult<Words> {
        (**self).rotate_credentials(ctx, input).await
    }
}
