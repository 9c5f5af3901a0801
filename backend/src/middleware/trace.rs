//! Request tracing middleware.
//!
//! Every request runs inside a fresh [`TraceId`] scope, gets a `trace-id`
//! response header and emits one completion event carrying method, path,
//! status and latency.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{Ready, ready};
use tracing::{error, info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory wrapping each request in a trace scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use gadget_registry::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: Rc<S>,
}

fn attach_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => error!(%err, %trace_id, "failed to encode trace identifier header"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::fresh();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let service = Rc::clone(&self.service);
        let started = Instant::now();

        // The inner call must happen inside the scope so extractors and
        // handlers observe the trace id.
        Box::pin(trace_id.in_scope(async move {
            let mut res = service.call(req).await?;
            attach_header(&mut res, trace_id);

            let status = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis();
            if res.status().is_server_error() {
                warn!(%trace_id, %method, %path, status, elapsed_ms, "request failed");
            } else {
                info!(%trace_id, %method, %path, status, elapsed_ms, "request completed");
            }
            Ok(res)
        }))
    }
}
