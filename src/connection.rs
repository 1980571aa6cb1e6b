//! IMAP connection establishment and failure classification
//!
//! Provides the stream wrapper unifying TLS and plain transports, the
//! `connect()` / `select()` helpers used by [`crate::CensusClient`],
//! and the mapping from low-level transport errors onto the
//! user-facing error taxonomy.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::scope::MailboxScope;
use async_imap::Session;
use futures::io::{AsyncRead, AsyncWrite};
use rustls::pki_types::ServerName;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};
use tracing::{debug, info};

/// Transport under the IMAP session: implicit TLS or plain TCP.
pub(crate) enum ImapStream {
    Tls(Compat<tokio_rustls::client::TlsStream<TcpStream>>),
    Plain(Compat<TcpStream>),
}

impl AsyncRead for ImapStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<std::io::Result<usize>> {
        match self.get_mut() {
            Self::Tls(s) => Pin::new(s).poll_read(cx, buf),
            Self::Plain(s) => Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ImapStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        match self.get_mut() {
            Self::Tls(s) => Pin::new(s).poll_write(cx, buf),
            Self::Plain(s) => Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            Self::Tls(s) => Pin::new(s).poll_flush(cx),
            Self::Plain(s) => Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            Self::Tls(s) => Pin::new(s).poll_close(cx),
            Self::Plain(s) => Pin::new(s).poll_close(cx),
        }
    }
}

impl fmt::Debug for ImapStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tls(_) => f.write_str("ImapStream::Tls"),
            Self::Plain(_) => f.write_str("ImapStream::Plain"),
        }
    }
}

/// An authenticated IMAP session over either transport.
pub(crate) type ImapSession = Session<ImapStream>;

/// Build a TLS connector that accepts all certificates.
///
/// Supports self-signed deployments (local bridges, test servers)
/// without cert provisioning.
fn tls_connector() -> TlsConnector {
    let config = rustls::ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAllVerifier))
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

/// Open a transport connection and authenticate.
///
/// Connect failures classify as [`Error::Connect`] (naming the host),
/// TLS failures as [`Error::Tls`], and a LOGIN rejection as
/// [`Error::Auth`]. On LOGIN rejection the unauthenticated client is
/// still logged out best-effort before the error is returned.
pub(crate) async fn connect(config: &SessionConfig) -> Result<ImapSession> {
    let addr = format!("{}:{}", config.host, config.port);
    debug!("Connecting to IMAP server at {}", addr);

    let tcp_stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| Error::Connect {
            host: config.host.clone(),
            source,
        })?;

    let stream = if config.use_tls {
        let connector = tls_connector();
        let server_name = ServerName::try_from(config.host.clone())
            .map_err(|e| Error::Tls(format!("Invalid server name: {e}")))?;
        let tls_stream = connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| Error::Tls(e.to_string()))?;
        ImapStream::Tls(tls_stream.compat())
    } else {
        ImapStream::Plain(tcp_stream.compat())
    };

    let client = async_imap::Client::new(stream);

    let session = match client.login(&config.username, &config.password).await {
        Ok(session) => session,
        Err((e, mut client)) => {
            // The connection is still usable, say goodbye before
            // surfacing the classification.
            if let Err(bye) = client.run_command_and_check_ok("LOGOUT", None).await {
                debug!("Logout after rejected login failed: {}", bye);
            }
            return Err(classify_login_error(&e));
        }
    };

    info!("Connected to IMAP server");
    Ok(session)
}

/// SELECT the scope's mailbox, taking the session's lock on it.
pub(crate) async fn select(session: &mut ImapSession, scope: MailboxScope) -> Result<()> {
    let mailbox = scope.mailbox_name();
    session.select(mailbox).await.map_err(|e| match e {
        async_imap::error::Error::No(_) => Error::MailboxSelect {
            mailbox: mailbox.to_string(),
            hint: scope.select_hint(),
        },
        other => Error::Imap(format!("Failed to select {mailbox}: {other}")),
    })?;
    Ok(())
}

fn classify_login_error(err: &async_imap::error::Error) -> Error {
    match err {
        async_imap::error::Error::No(_) => Error::Auth,
        other => Error::Imap(format!("Login failed: {other}")),
    }
}

/// Certificate verifier that accepts all certificates
/// (for self-signed bridge and test deployments).
#[derive(Debug)]
struct AcceptAllVerifier;

impl rustls::client::danger::ServerCertVerifier for AcceptAllVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}
