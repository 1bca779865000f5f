/// Resizes a raw digest to `target` bytes.
///
/// Shorter targets keep a prefix. Longer ones grow the buffer in rounds,
/// appending `buf[i] ^ buf[(i * stride) % len]` for each existing byte until
/// it is long enough, then truncate.
pub fn resize_digest(raw: &[u8], target: usize, stride: usize) -> Vec<u8> {
    if target <= raw.len() {
        return raw[..target].to_vec();
    }
    if raw.is_empty() {
        return vec![0; target];
    }
    let mut buf = Vec::with_capacity(target.next_power_of_two());
    buf.extend_from_slice(raw);
    while buf.len() < target {
        let len = buf.len();
        for i in 0..len {
            let byte = buf[i] ^ buf[(i * stride) % len];
            buf.push(byte);
        }
    }
    buf.truncate(target);
    buf
}
