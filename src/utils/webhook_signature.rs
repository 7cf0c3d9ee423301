use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn hex_hmac(secret: &str, parts: &[&[u8]]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    hex::encode(mac.finalize().into_bytes())
}

/// Check the gateway's webhook signature: hex HMAC-SHA256 of the raw request
/// body. The caller must pass the body bytes exactly as received on the wire;
/// re-serializing the parsed JSON can reorder fields and break the signature.
pub fn verify_webhook_signature(raw_body: &[u8], signature_header: &str, secret: &str) -> bool {
    let expected = hex_hmac(secret, &[raw_body]);
    expected
        .as_bytes()
        .ct_eq(signature_header.as_bytes())
        .unwrap_u8()
        == 1
}

/// Check the signature the gateway hands to the client after checkout:
/// hex HMAC-SHA256 over `"{order_id}|{payment_id}"` with the key secret.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    key_secret: &str,
) -> bool {
    let expected = hex_hmac(
        key_secret,
        &[order_id.as_bytes(), b"|", payment_id.as_bytes()],
    );
    expected.as_bytes().ct_eq(signature.as_bytes()).unwrap_u8() == 1
}
