macro_rules! sensitive_debug {
    ($ident:ident < $($generic:ident),* >) => {
        impl<$($generic),*> ::std::fmt::Debug for $ident<$($generic),*> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str("[sensitive]")
            }
        }
    };
}

pub(crate) use sensitive_debug;
