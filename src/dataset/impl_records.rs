use super::{DatasetBase, Records};
use ndarray::{ArrayBase, Data, Ix2};

impl<F, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}

impl<R: Records, T> Records for DatasetBase<R, T> {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}
