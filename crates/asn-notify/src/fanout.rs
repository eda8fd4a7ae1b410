//! Sequential best-effort fan-out over fallible async operations.
//!
//! Used wherever one failure must not stop the rest: resolving recipient
//! emails and delivering to recipients. Work runs one item at a time so the
//! platform never sees a burst of parallel calls from a single run.

use std::future::Future;

/// Run `op` for every item in order and collect the successes.
///
/// A failure is handed to `on_failure` together with the item that caused it
/// and the loop moves on. Successes keep input order.
pub async fn best_effort<'a, X, T, E, F, Fut, L>(
    items: &'a [X],
    mut op: F,
    mut on_failure: L,
) -> Vec<T>
where
    F: FnMut(&'a X) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    L: FnMut(&'a X, E),
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match op(item).await {
            Ok(value) => out.push(value),
            Err(err) => on_failure(item, err),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failures_are_reported_and_skipped() {
        let items = vec![1, 2, 3, 4];
        let mut failed = Vec::new();

        let out = best_effort(
            &items,
            |n| async move {
                if n % 2 == 0 {
                    Err(format!("even {n}"))
                } else {
                    Ok(n * 10)
                }
            },
            |n, err| failed.push((*n, err)),
        )
        .await;

        assert_eq!(out, vec![10, 30]);
        assert_eq!(
            failed,
            vec![(2, "even 2".to_string()), (4, "even 4".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_input_yields_nothing() {
        let items: Vec<u8> = Vec::new();
        let out: Vec<u8> = best_effort(
            &items,
            |n| async move { Ok::<u8, ()>(*n) },
            |_, _| panic!("no failures expected"),
        )
        .await;
        assert!(out.is_empty());
    }
}
