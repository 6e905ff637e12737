use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::candidates::ColumnCandidates;
use super::error::{CollaboratorError, SynthesisError};
use super::ports::ConditionScorer;

/// 并发为所有候选打分 (扇出)，全部返回后按原顺序写回 (汇合)。
/// 单次调用失败记为 0 分；strict 模式下直接中止本次合成。
pub async fn score_candidates(
    mut groups: Vec<ColumnCandidates>,
    question: &str,
    scorer: &dyn ConditionScorer,
    concurrency: usize,
    strict: bool,
) -> Result<Vec<ColumnCandidates>, SynthesisError> {
    let conditions: Vec<String> = groups
        .iter()
        .flat_map(|g| g.candidates.iter().map(|c| c.serialized()))
        .collect();

    let results: Vec<Result<f64, CollaboratorError>> = stream::iter(conditions.clone())
        .map(|cond| async move {
            let p = scorer.score(question, &cond).await?;
            if !(0.0..=1.0).contains(&p) {
                return Err(CollaboratorError::InvalidResponse(format!(
                    "probability {p} outside [0, 1]"
                )));
            }
            Ok(p)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut results = conditions.iter().zip(results);
    for group in groups.iter_mut() {
        for cand in group.candidates.iter_mut() {
            let Some((cond, res)) = results.next() else {
                break;
            };
            match res {
                Ok(p) => {
                    debug!("条件打分: {} -> {:.4}", cond, p);
                    cand.score = Some(p);
                }
                Err(e) if strict => {
                    return Err(SynthesisError::SynthesisAborted(format!(
                        "scoring '{cond}' failed: {e}"
                    )));
                }
                Err(e) => {
                    warn!("条件打分失败，按 0 分处理: {} ({})", cond, e);
                    cand.score = Some(0.0);
                    cand.scoring_failed = true;
                }
            }
        }
    }
    Ok(groups)
}
