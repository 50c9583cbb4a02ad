multiversx_sc::imports!();

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes `value` in decimal into the tail of `out`, returns the digits.
pub fn decimal_digits(value: u64, out: &mut [u8; 20]) -> &[u8] {
    let mut cursor = out.len();
    let mut remaining = value;
    loop {
        cursor -= 1;
        out[cursor] = b'0' + (remaining % 10) as u8;
        remaining /= 10;
        if remaining == 0 {
            break;
        }
    }
    &out[cursor..]
}

/// Lowercase hex of at most 32 bytes.
pub fn hex_digits<'a>(bytes: &[u8], out: &'a mut [u8; 64]) -> &'a [u8] {
    let len = core::cmp::min(bytes.len(), 32);
    for (i, byte) in bytes[..len].iter().enumerate() {
        out[i * 2] = HEX_DIGITS[(byte >> 4) as usize];
        out[i * 2 + 1] = HEX_DIGITS[(byte & 0x0f) as usize];
    }
    &out[..len * 2]
}

pub fn append_u64<M: ManagedTypeApi>(buffer: &mut ManagedBuffer<M>, value: u64) {
    let mut digits = [0u8; 20];
    buffer.append_bytes(decimal_digits(value, &mut digits));
}

pub fn append_hex<M: ManagedTypeApi>(buffer: &mut ManagedBuffer<M>, bytes: &[u8]) {
    let mut digits = [0u8; 64];
    buffer.append_bytes(hex_digits(bytes, &mut digits));
}

/// `prefix` followed by `value`, e.g. `zk_pool_3`.
pub fn prefixed_id<M: ManagedTypeApi>(prefix: &[u8], value: u64) -> ManagedBuffer<M> {
    let mut buffer = ManagedBuffer::new_from_bytes(prefix);
    append_u64(&mut buffer, value);
    buffer
}

/// Abbreviated digest: `prefix` + first two bytes + `...` + last two bytes.
pub fn short_digest<M: ManagedTypeApi>(prefix: &[u8], digest: &[u8; 32]) -> ManagedBuffer<M> {
    let mut buffer = ManagedBuffer::new_from_bytes(prefix);
    append_hex(&mut buffer, &digest[..2]);
    buffer.append_bytes(b"...");
    append_hex(&mut buffer, &digest[30..]);
    buffer
}

/// `signed/required`, the signature progress shown on a transaction.
pub fn progress<M: ManagedTypeApi>(signed: u32, required: u32) -> ManagedBuffer<M> {
    let mut buffer = ManagedBuffer::new();
    append_u64(&mut buffer, u64::from(signed));
    buffer.append_bytes(b"/");
    append_u64(&mut buffer, u64::from(required));
    buffer
}
