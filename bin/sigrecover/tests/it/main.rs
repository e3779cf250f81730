#![allow(missing_docs)]

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

const SIGRECOVER: &str = env!("CARGO_BIN_EXE_sigrecover");

const APPROVE_RAW: &str = "0xf8aa818f851d1a94a20082becf94066798d9ef0833ccc719076dab77199ecbd178b080b844095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff25a007cca508ee0c29e9e3402ef74bb611b8d8532d4682ac04f21fbf21171244208ba02cf161165f71d0de343f31a4666c29a2c804d3f18d8a7a276b8fb7d72477e1a8";

const APPROVE_JSON: &str = r#"{
    "from": "0xda86793f4aa24c0716b657eed899a73b9a12f937",
    "gas": "0xbecf",
    "gasPrice": "0x1d1a94a200",
    "hash": "0x2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d",
    "input": "0x095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    "nonce": "0x8f",
    "to": "0x066798d9ef0833ccc719076dab77199ecbd178b0",
    "value": "0x0",
    "v": "0x25",
    "r": "0x7cca508ee0c29e9e3402ef74bb611b8d8532d4682ac04f21fbf21171244208b",
    "s": "0x2cf161165f71d0de343f31a4666c29a2c804d3f18d8a7a276b8fb7d72477e1a8"
}"#;

const SENDER: &str = "0xDA86793f4aa24C0716b657eeD899a73b9a12F937";
const HASH: &str = "0x2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d";
const PREIMAGE: &str = "0x8342181a4b3dd526c10ac9d25b85bd896245199e386af170f6d7649b00174b3a";

/// Runs `sigrecover <args>` with `stdin` piped in.
///
/// Tracing is suppressed via `RUST_LOG=off` so that log lines never reach the assertions.
fn sigrecover(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(SIGRECOVER)
        .env("RUST_LOG", "off")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

/// Runs `sigrecover <args>` and returns stdout, asserting exit code 0.
#[track_caller]
fn sigrecover_ok(args: &[&str], stdin: &str) -> String {
    let output = sigrecover(args, stdin);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "args {args:?} failed.\nstdout: {stdout}\nstderr: {stderr}");
    stdout.into_owned()
}

#[test]
fn help() {
    let stdout = sigrecover_ok(&["--help"], "");
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
    for command in ["tx", "raw-tx", "validators"] {
        assert!(stdout.contains(command), "stdout: {stdout}");
    }
}

#[test]
fn raw_tx_recovers_sender() {
    let stdout = sigrecover_ok(&["raw-tx", APPROVE_RAW], "");
    assert!(stdout.contains(&format!("from      {SENDER}")), "stdout: {stdout}");
    assert!(stdout.contains(&format!("preimage  {PREIMAGE}")), "stdout: {stdout}");
    assert!(stdout.contains(&format!("hash      {HASH}")), "stdout: {stdout}");
    assert!(stdout.contains(&format!("signed    {APPROVE_RAW}")), "stdout: {stdout}");

    let stdout = sigrecover_ok(&["raw-tx", "--strict", APPROVE_RAW], "");
    assert!(stdout.contains(SENDER), "stdout: {stdout}");
}

#[test]
fn tx_reads_stdin() {
    let stdout = sigrecover_ok(&["tx", "--expect-from", SENDER], APPROVE_JSON);
    assert!(stdout.contains(&format!("from      {SENDER}")), "stdout: {stdout}");
    assert!(stdout.contains(&format!("hash      {HASH}")), "stdout: {stdout}");
    assert!(stdout.contains("unsigned  0xf86a818f"), "stdout: {stdout}");
}

#[test]
fn tx_rejects_unexpected_sender() {
    let output = sigrecover(
        &["tx", "--expect-from", "0x0000000000000000000000000000000000000001"],
        APPROVE_JSON,
    );
    assert!(!output.status.success());
}

#[test]
fn validators_without_seals() {
    let extra_data = format!("0xe5a0{}c0c080c0", "00".repeat(32));
    let hash = format!("0x{}", "11".repeat(32));
    let stdout = sigrecover_ok(&["validators", "--extra-data", &extra_data, "--hash", &hash], "");
    assert!(stdout.is_empty(), "stdout: {stdout}");
}

#[test]
fn validators_rejects_malformed_extra_data() {
    let hash = format!("0x{}", "11".repeat(32));
    let output = sigrecover(&["validators", "--extra-data", "0xc0", "--hash", &hash], "");
    assert!(!output.status.success());

    let output = sigrecover(&["validators"], r#"{"hash":"0x00","extraData":"0xc0"}"#);
    assert!(!output.status.success());
}
