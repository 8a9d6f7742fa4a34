//! Fake authoritative server for exchange tests
//!
//! Accepts a single TCP connection and reads one length-prefixed request.
//! It answers with a scripted series of responses, each TSIG-signed with the
//! client's own key and chained to the request MAC as RFC 8945 describes.

#![allow(dead_code)]

use std::net::Ipv4Addr;
use std::str::FromStr;

use ddns_core::{InvocationContext, KeyAlgorithm, Keyring};
use hickory_client::proto::dnssec::rdata::DNSSECRData;
use hickory_client::proto::dnssec::rdata::tsig::{TSIG, make_tsig_record, message_tbs};
use hickory_client::proto::dnssec::tsig::TSigner;
use hickory_client::proto::op::{Message, MessageType, ResponseCode};
use hickory_client::proto::rr::rdata::{A, AAAA, SOA};
use hickory_client::proto::rr::{Name, RData, Record};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One response message: its code and answer records
pub struct Reply {
    pub code: ResponseCode,
    pub answers: Vec<Record>,
}

impl Reply {
    pub fn code(code: ResponseCode) -> Self {
        Self {
            code,
            answers: Vec::new(),
        }
    }

    pub fn answers(answers: Vec<Record>) -> Self {
        Self {
            code: ResponseCode::NoError,
            answers,
        }
    }
}

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

/// Context for `example.com.` served on 127.0.0.1:`port`
pub fn test_context(port: u16) -> InvocationContext {
    // "dG9wLXNlY3JldA==" decodes to "top-secret"
    let keyring =
        Keyring::from_text("ddns-key", "dG9wLXNlY3JldA==", KeyAlgorithm::HmacSha256).unwrap();
    InvocationContext::new(name("example.com."), "127.0.0.1", port, keyring).unwrap()
}

pub fn soa_record(origin: &str) -> Record {
    let soa = SOA::new(
        name(&format!("ns1.{origin}")),
        name(&format!("hostmaster.{origin}")),
        2024010101,
        3600,
        600,
        86400,
        300,
    );
    Record::from_rdata(name(origin), 3600, RData::SOA(soa))
}

pub fn a_record(owner: &str, ip: [u8; 4]) -> Record {
    Record::from_rdata(name(owner), 3600, RData::A(A(Ipv4Addr::from(ip))))
}

pub fn aaaa_record(owner: &str, ip: &str) -> Record {
    Record::from_rdata(name(owner), 3600, RData::AAAA(AAAA(ip.parse().unwrap())))
}

/// Start a server that answers one request with `replies`, in order
///
/// The handle resolves to the request as received.
pub async fn serve(signer: TSigner, replies: Vec<Reply>) -> (u16, JoinHandle<Message>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_message(&mut stream).await;

        let request_tsig = signature_of(&request);
        let time = request_tsig.time();
        let mut previous_mac = request_tsig.mac().to_vec();

        for (index, reply) in replies.into_iter().enumerate() {
            let mut response = Message::new();
            response
                .set_id(request.id())
                .set_message_type(MessageType::Response)
                .set_op_code(request.op_code())
                .set_response_code(reply.code);
            response.add_queries(request.queries().to_vec());
            response.add_answers(reply.answers);

            previous_mac = sign_response(&signer, &mut response, &previous_mac, time, index == 0);
            write_message(&mut stream, &response).await;
        }

        // hold the connection until the client hangs up
        let _ = stream.read_u16().await;
        request
    });

    (port, handle)
}

/// Start a server that accepts and reads, but never answers
pub async fn serve_silently() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _ = read_message(&mut stream).await;
        let _ = stream.read_u16().await;
    });

    port
}

/// The TSIG of a signed message
pub fn signature_of(message: &Message) -> TSIG {
    match message.signature().first().map(Record::data) {
        Some(RData::DNSSEC(DNSSECRData::TSIG(tsig))) => tsig.clone(),
        other => panic!("message is not TSIG-signed: {other:?}"),
    }
}

/// Sign `response` chained to `previous_mac` and return its MAC
///
/// The first response covers all TSIG variables; later messages of a
/// transfer cover only time and fudge.
fn sign_response(
    signer: &TSigner,
    response: &mut Message,
    previous_mac: &[u8],
    time: u64,
    first: bool,
) -> Vec<u8> {
    let pre_tsig = TSIG::new(
        signer.algorithm().clone(),
        time,
        signer.fudge(),
        Vec::new(),
        response.id(),
        0,
        Vec::new(),
    );

    let tbs = if first {
        message_tbs(Some(previous_mac), &*response, &pre_tsig, signer.signer_name()).unwrap()
    } else {
        let mut tbs = Vec::new();
        tbs.extend_from_slice(&(previous_mac.len() as u16).to_be_bytes());
        tbs.extend_from_slice(previous_mac);
        tbs.extend_from_slice(&response.to_vec().unwrap());
        tbs.extend_from_slice(&((time >> 32) as u16).to_be_bytes());
        tbs.extend_from_slice(&(time as u32).to_be_bytes());
        tbs.extend_from_slice(&signer.fudge().to_be_bytes());
        tbs
    };

    let mac = signer.sign(&tbs).unwrap();
    response.add_tsig(make_tsig_record(
        signer.signer_name().clone(),
        pre_tsig.set_mac(mac.clone()),
    ));
    mac
}

async fn read_message(stream: &mut TcpStream) -> Message {
    let len = stream.read_u16().await.unwrap();
    let mut buf = vec![0; len as usize];
    stream.read_exact(&mut buf).await.unwrap();
    Message::from_vec(&buf).unwrap()
}

async fn write_message(stream: &mut TcpStream, message: &Message) {
    let buf = message.to_vec().unwrap();
    stream.write_u16(buf.len() as u16).await.unwrap();
    stream.write_all(&buf).await.unwrap();
    stream.flush().await.unwrap();
}
