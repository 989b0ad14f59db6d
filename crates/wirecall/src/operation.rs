//! Operation descriptor
//!
//! A declarative description of one network operation: the asynchronous call
//! itself plus the lifecycle hooks fired around it. Built once per
//! operation; a renewal retry re-invokes the same call closure and shares
//! the rest of the descriptor.

use crate::error::{Failure, NetworkError};
use futures::future::BoxFuture;
use std::future::Future;

pub(crate) type ExecuteFn<T> =
    Box<dyn Fn() -> BoxFuture<'static, Result<T, Failure>> + Send + Sync>;
pub(crate) type SuccessFn<T> = Box<dyn Fn(&T) + Send + Sync>;
pub(crate) type AsyncSuccessFn<T> = Box<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;
pub(crate) type ErrorFn<E> =
    Box<dyn Fn(NetworkError, Option<E>) -> BoxFuture<'static, ()> + Send + Sync>;
pub(crate) type HookFn = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;
pub(crate) type ToggleFn = Box<dyn Fn(bool) + Send + Sync>;

/// Configuration of a single network operation.
///
/// `T` is the success payload; `E` the caller-declared error payload decoded
/// from the error wrapper's extensions. Every field except the call itself
/// is optional.
pub struct Operation<T, E = ()> {
    pub(crate) execute: Option<ExecuteFn<T>>,
    pub(crate) on_success: Option<SuccessFn<T>>,
    pub(crate) on_success_async: Option<AsyncSuccessFn<T>>,
    pub(crate) on_error: Option<ErrorFn<E>>,
    pub(crate) on_connection_error: Option<HookFn>,
    pub(crate) on_start: Option<HookFn>,
    pub(crate) on_finish: Option<HookFn>,
    pub(crate) loading: Option<ToggleFn>,
    pub(crate) module_toggle: Option<ToggleFn>,
}

impl<T, E> Operation<T, E> {
    /// Start building an operation descriptor
    pub fn builder() -> OperationBuilder<T, E> {
        OperationBuilder {
            operation: Operation {
                execute: None,
                on_success: None,
                on_success_async: None,
                on_error: None,
                on_connection_error: None,
                on_start: None,
                on_finish: None,
                loading: None,
                module_toggle: None,
            },
        }
    }
}

/// Builder for [`Operation`].
pub struct OperationBuilder<T, E = ()> {
    operation: Operation<T, E>,
}

impl<T, E> OperationBuilder<T, E> {
    /// The asynchronous call. Must be re-invocable: a renewal retry runs the
    /// same closure again.
    pub fn execute<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Failure>> + Send + 'static,
    {
        self.operation.execute = Some(Box::new(move || Box::pin(f())));
        self
    }

    /// Synchronous success hook; observes the raw result before any
    /// asynchronous post-processing runs.
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.operation.on_success = Some(Box::new(f));
        self
    }

    /// Asynchronous success hook, awaited after the synchronous hook. The
    /// operation does not finish until it completes, so database writes are
    /// safe here.
    pub fn on_success_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.operation.on_success_async = Some(Box::new(move |result| Box::pin(f(result))));
        self
    }

    /// Typed-error hook, invoked with the classified error and the decoded
    /// error payload.
    pub fn on_error<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(NetworkError, Option<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.operation.on_error = Some(Box::new(move |error, data| Box::pin(f(error, data))));
        self
    }

    /// Hook consuming no-connection failures instead of the global handler.
    pub fn on_connection_error<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.operation.on_connection_error = Some(Box::new(move || Box::pin(f())));
        self
    }

    /// Hook awaited before the call executes.
    pub fn on_start<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.operation.on_start = Some(Box::new(move || Box::pin(f())));
        self
    }

    /// Hook awaited at the final stage of the operation.
    pub fn on_finish<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.operation.on_finish = Some(Box::new(move || Box::pin(f())));
        self
    }

    /// Loading-indicator visibility hook.
    pub fn loading<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.operation.loading = Some(Box::new(f));
        self
    }

    /// Side-module load/unload hook, invoked with `true` before the call and
    /// `false` once it resolved.
    pub fn module_toggle<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.operation.module_toggle = Some(Box::new(f));
        self
    }

    /// Finish building. The executor validates the descriptor before use.
    pub fn build(self) -> Operation<T, E> {
        self.operation
    }
}
