use crate::error::{Result, TitanicError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Náhodný split indexov na (train, test).
/// Veľkosť testu je `ceil(test_size * n)`, poradie určuje `seed`.
pub fn train_test_split(n_samples: usize, test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TitanicError::InvalidParameter(format!(
            "test_size musí byť v intervale (0, 1), je {}",
            test_size
        )));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(TitanicError::InvalidParameter(format!(
            "Nedá sa rozdeliť {} vzoriek s test_size {}",
            n_samples, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok((train, test))
}

/// Stratifikovaný k-fold bez miešania: indexy každej triedy sa v poradí
/// rozdelia do `k` súvislých častí, fold `i` testuje i-tu časť každej triedy.
pub fn stratified_k_fold(labels: &[i32], k: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 {
        return Err(TitanicError::InvalidParameter(format!("cv_folds musí byť aspoň 2, je {}", k)));
    }
    if labels.len() < k {
        return Err(TitanicError::InvalidParameter(format!(
            "{} vzoriek nestačí na {} foldov",
            labels.len(),
            k
        )));
    }

    let mut classes: Vec<i32> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let mut fold_of = vec![0usize; labels.len()];
    for class in classes {
        let members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == class).collect();
        let mut start = 0;
        for (fold, size) in chunk_sizes(members.len(), k).into_iter().enumerate() {
            for &i in &members[start..start + size] {
                fold_of[i] = fold;
            }
            start += size;
        }
    }

    let folds: Vec<(Vec<usize>, Vec<usize>)> = (0..k)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&i| fold_of[i] == fold);
            (train, test)
        })
        .collect();

    if folds.iter().any(|(_, test)| test.is_empty()) {
        return Err(TitanicError::InvalidParameter(format!(
            "Niektorý z {} foldov by mal prázdnu testovaciu časť",
            k
        )));
    }
    Ok(folds)
}

/// Veľkosti `k` častí z `n` prvkov, prvé časti sú o jeden väčšie
fn chunk_sizes(n: usize, k: usize) -> Vec<usize> {
    (0..k).map(|i| n / k + usize::from(i < n % k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(891, 0.2, 42).unwrap();
        assert_eq!(test.len(), 179);
        assert_eq!(train.len(), 712);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..891).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible() {
        assert_eq!(train_test_split(50, 0.2, 42).unwrap(), train_test_split(50, 0.2, 42).unwrap());
        assert_ne!(train_test_split(50, 0.2, 42).unwrap(), train_test_split(50, 0.2, 7).unwrap());
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        assert!(train_test_split(10, 0.0, 1).is_err());
        assert!(train_test_split(10, 1.0, 1).is_err());
        assert!(train_test_split(1, 0.5, 1).is_err());
    }

    #[test]
    fn test_folds_partition_and_stratify() {
        let labels: Vec<i32> = (0..20).map(|i| if i < 8 { 1 } else { 0 }).collect();
        let folds = stratified_k_fold(&labels, 4).unwrap();
        assert_eq!(folds.len(), 4);

        let mut seen = vec![0; labels.len()];
        for (train, test) in &folds {
            assert_eq!(train.len() + test.len(), labels.len());
            assert_eq!(test.iter().filter(|&&i| labels[i] == 1).count(), 2);
            assert_eq!(test.iter().filter(|&&i| labels[i] == 0).count(), 3);
            for &i in test {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_folds_need_enough_samples() {
        assert!(stratified_k_fold(&[0, 1], 5).is_err());
        assert!(stratified_k_fold(&[0, 1, 0], 1).is_err());
        // 3 vzorky do 3 foldov: trieda 0 obsadí foldy 0 a 1, trieda 1 fold 0
        assert!(stratified_k_fold(&[0, 0, 1], 3).is_err());
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(chunk_sizes(7, 3), vec![3, 2, 2]);
        assert_eq!(chunk_sizes(2, 3), vec![1, 1, 0]);
    }
}
