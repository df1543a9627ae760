//! 批次拆分
//!
//! LLM 单次输出的长度有上限，题目多时需要拆成多个批次分别请求。

/// 把题目总数拆分为若干批次
///
/// 除最后一个批次外，每个批次都是 `chunk_size` 道题；最后一个批次取余数
/// （整除时也是 `chunk_size`）。例如 23 道题、每批 10 道 → `[10, 10, 3]`。
pub fn plan_chunks(total: usize, chunk_size: usize) -> Vec<usize> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(total.div_ceil(chunk_size));
    let mut remaining = total;

    while remaining > 0 {
        let size = remaining.min(chunk_size);
        chunks.push(size);
        remaining -= size;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_goes_to_last_chunk() {
        assert_eq!(plan_chunks(23, 10), vec![10, 10, 3]);
    }

    #[test]
    fn test_even_division() {
        assert_eq!(plan_chunks(20, 10), vec![10, 10]);
        assert_eq!(plan_chunks(50, 25), vec![25, 25]);
    }

    #[test]
    fn test_small_request_is_single_chunk() {
        assert_eq!(plan_chunks(1, 10), vec![1]);
        assert_eq!(plan_chunks(10, 10), vec![10]);
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        for total in 1..=50 {
            let chunks = plan_chunks(total, 10);
            assert_eq!(chunks.len(), (total + 9) / 10);
            assert_eq!(chunks.iter().sum::<usize>(), total);
            assert!(chunks.iter().all(|&size| (1..=10).contains(&size)));
        }
    }

    #[test]
    fn test_zero_total_has_no_chunks() {
        assert!(plan_chunks(0, 10).is_empty());
    }
}
