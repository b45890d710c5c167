use bytes::Bytes;
use http::{Request, Response};
use std::{fmt::Debug, io::Read};

/// Error returned by an [`HttpClient`] implementation.
pub type HttpError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A blocking HTTP client used to deliver notices.
///
/// Implemented for [`ureq::Agent`] out of the box. Implement it yourself to
/// route notices through a different client, or to capture outgoing requests
/// in tests.
pub trait HttpClient: Debug + Send + Sync {
    /// Send the request and return the response.
    ///
    /// Non-success statuses are returned as a regular [`Response`]; `Err` is
    /// reserved for transport failures where no response exists.
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Bytes>, HttpError>;
}

impl HttpClient for ureq::Agent {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Bytes>, HttpError> {
        let (parts, body) = request.into_parts();
        let mut call = self.request(parts.method.as_str(), &parts.uri.to_string());
        for (name, value) in &parts.headers {
            call = call.set(name.as_str(), value.to_str()?);
        }
        let response = match call.send_bytes(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => return Err(err.into()),
        };
        let status = response.status();
        let len = response
            .header(http::header::CONTENT_LENGTH.as_str())
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let mut bytes = Vec::with_capacity(len);
        response.into_reader().read_to_end(&mut bytes)?;
        Ok(Response::builder().status(status).body(Bytes::from(bytes))?)
    }
}
