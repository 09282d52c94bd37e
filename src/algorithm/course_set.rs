/// Conjunto de ramos codificado como bitset sobre los índices del
/// `KnowledgeStore`. Todos los conjuntos de una misma búsqueda se crean con la
/// misma capacidad, de modo que igualdad y hash dependen sólo de los bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseSet {
    words: Vec<u64>,
}

impl CourseSet {
    pub fn empty(capacity: usize) -> Self {
        CourseSet { words: vec![0; capacity.div_ceil(64)] }
    }

    pub fn insert(&mut self, idx: usize) {
        let w = idx / 64;
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        self.words[w] |= 1 << (idx % 64);
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.words
            .get(idx / 64)
            .is_some_and(|w| w & (1 << (idx % 64)) != 0)
    }

    pub fn union(&self, other: &CourseSet) -> CourseSet {
        let len = self.words.len().max(other.words.len());
        let words = (0..len)
            .map(|i| self.words.get(i).copied().unwrap_or(0) | other.words.get(i).copied().unwrap_or(0))
            .collect();
        CourseSet { words }
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Índices en orden ascendente.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            (0..64).filter(move |b| w & (1 << b) != 0).map(move |b| wi * 64 + b)
        })
    }
}
