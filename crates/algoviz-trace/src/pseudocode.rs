//! Pseudocode listings shown next to each visualization.

use algoviz_core::{
    Algorithm, GraphAlgorithm, ListOperationKind, SearchAlgorithm, SortAlgorithm, TreeOperationKind,
};

/// Returns the listing for `algorithm`, one line per entry.
pub fn listing(algorithm: Algorithm) -> &'static [&'static str] {
    match algorithm {
        Algorithm::Sort(SortAlgorithm::Bubble) => BUBBLE_SORT,
        Algorithm::Sort(SortAlgorithm::Insertion) => INSERTION_SORT,
        Algorithm::Sort(SortAlgorithm::Selection) => SELECTION_SORT,
        Algorithm::Sort(SortAlgorithm::Merge) => MERGE_SORT,
        Algorithm::Sort(SortAlgorithm::Quick) => QUICK_SORT,
        Algorithm::Search(SearchAlgorithm::Linear) => LINEAR_SEARCH,
        Algorithm::Search(SearchAlgorithm::Binary) => BINARY_SEARCH,
        Algorithm::Graph(GraphAlgorithm::Bfs) => BFS,
        Algorithm::Graph(GraphAlgorithm::Dfs) => DFS,
        Algorithm::Graph(GraphAlgorithm::Dijkstra) => DIJKSTRA,
        Algorithm::Tree(TreeOperationKind::Insert) => TREE_INSERT,
        Algorithm::Tree(TreeOperationKind::Delete) => TREE_DELETE,
        Algorithm::Tree(TreeOperationKind::Search) => TREE_SEARCH,
        Algorithm::Tree(TreeOperationKind::Inorder) => TREE_INORDER,
        Algorithm::Tree(TreeOperationKind::Preorder) => TREE_PREORDER,
        Algorithm::Tree(TreeOperationKind::Postorder) => TREE_POSTORDER,
        Algorithm::List(ListOperationKind::Insert) => LIST_INSERT,
        Algorithm::List(ListOperationKind::Delete) => LIST_DELETE,
        Algorithm::List(ListOperationKind::Search) => LIST_SEARCH,
        Algorithm::List(ListOperationKind::Traverse) => LIST_TRAVERSE,
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

const BUBBLE_SORT: &[&str] = &[
    "procedure bubbleSort(A: list of sortable items)",
    "    n = length(A)",
    "    repeat",
    "        swapped = false",
    "        for i = 1 to n-1 inclusive do",
    "            if A[i-1] > A[i] then",
    "                swap(A[i-1], A[i])",
    "                swapped = true",
    "            end if",
    "        end for",
    "        n = n - 1",
    "    until not swapped",
    "end procedure",
];

const INSERTION_SORT: &[&str] = &[
    "procedure insertionSort(A: list of sortable items)",
    "    n = length(A)",
    "    for i = 1 to n-1 inclusive do",
    "        j = i",
    "        while j > 0 and A[j-1] > A[j] do",
    "            swap(A[j], A[j-1])",
    "            j = j - 1",
    "        end while",
    "    end for",
    "end procedure",
];

const SELECTION_SORT: &[&str] = &[
    "procedure selectionSort(A: list of sortable items)",
    "    n = length(A)",
    "    for i = 0 to n-2 inclusive do",
    "        minIndex = i",
    "        for j = i+1 to n-1 inclusive do",
    "            if A[j] < A[minIndex] then",
    "                minIndex = j",
    "            end if",
    "        end for",
    "        if minIndex ≠ i then",
    "            swap(A[i], A[minIndex])",
    "        end if",
    "    end for",
    "end procedure",
];

const MERGE_SORT: &[&str] = &[
    "procedure mergeSort(A: list of sortable items, lo: integer, hi: integer)",
    "    if lo < hi then",
    "        mid = floor((lo + hi) / 2)",
    "        mergeSort(A, lo, mid)",
    "        mergeSort(A, mid + 1, hi)",
    "        merge(A, lo, mid, hi)",
    "    end if",
    "end procedure",
    "",
    "procedure merge(A: list of sortable items, lo: integer, mid: integer, hi: integer)",
    "    create temporary arrays L and R",
    "    copy A[lo..mid] to L and A[mid+1..hi] to R",
    "    i = 0, j = 0, k = lo",
    "    while i < length(L) and j < length(R) do",
    "        if L[i] <= R[j] then",
    "            A[k] = L[i]",
    "            i = i + 1",
    "        else",
    "            A[k] = R[j]",
    "            j = j + 1",
    "        end if",
    "        k = k + 1",
    "    end while",
    "    copy remaining elements of L and R to A",
    "end procedure",
];

const QUICK_SORT: &[&str] = &[
    "procedure quickSort(A: list of sortable items, lo: integer, hi: integer)",
    "    if lo < hi then",
    "        p = partition(A, lo, hi)",
    "        quickSort(A, lo, p - 1)",
    "        quickSort(A, p + 1, hi)",
    "    end if",
    "end procedure",
    "",
    "procedure partition(A: list of sortable items, lo: integer, hi: integer)",
    "    pivot = A[hi]",
    "    i = lo - 1",
    "    for j = lo to hi - 1 do",
    "        if A[j] < pivot then",
    "            i = i + 1",
    "            swap(A[i], A[j])",
    "        end if",
    "    end for",
    "    swap(A[i + 1], A[hi])",
    "    return i + 1",
    "end procedure",
];

// ---------------------------------------------------------------------------
// Searching
// ---------------------------------------------------------------------------

const LINEAR_SEARCH: &[&str] = &[
    "procedure linearSearch(A: list of items, target: item)",
    "    n = length(A)",
    "    for i = 0 to n-1 do",
    "        if A[i] = target then",
    "            return i",
    "        end if",
    "    end for",
    "    return -1  // Target not found",
    "end procedure",
];

const BINARY_SEARCH: &[&str] = &[
    "procedure binarySearch(A: sorted list of items, target: item)",
    "    left = 0",
    "    right = length(A) - 1",
    "    while left <= right do",
    "        mid = floor((left + right) / 2)",
    "        if A[mid] = target then",
    "            return mid",
    "        else if A[mid] < target then",
    "            left = mid + 1",
    "        else",
    "            right = mid - 1",
    "        end if",
    "    end while",
    "    return -1  // Target not found",
    "end procedure",
];

// ---------------------------------------------------------------------------
// Graphs
// ---------------------------------------------------------------------------

const BFS: &[&str] = &[
    "procedure BFS(G, startNode)",
    "    let Q be a queue",
    "    label startNode as visited",
    "    Q.enqueue(startNode)",
    "    while Q is not empty do",
    "        v = Q.dequeue()",
    "        for all edges from v to w in G.adjacentEdges(v) do",
    "            if w is not labeled as visited then",
    "                label w as visited",
    "                Q.enqueue(w)",
    "            end if",
    "        end for",
    "    end while",
    "end procedure",
];

const DFS: &[&str] = &[
    "procedure DFS(G, startNode)",
    "    label startNode as visited",
    "    for all edges from startNode to v in G.adjacentEdges(startNode) do",
    "        if v is not labeled as visited then",
    "            DFS(G, v)",
    "        end if",
    "    end for",
    "end procedure",
];

const DIJKSTRA: &[&str] = &[
    "procedure Dijkstra(G, startNode)",
    "    for each vertex v in G do",
    "        dist[v] = infinity",
    "        prev[v] = undefined",
    "    end for",
    "    dist[startNode] = 0",
    "    let Q be a priority queue of vertices, ordered by dist values",
    "    add all vertices to Q",
    "    while Q is not empty do",
    "        u = vertex in Q with minimum dist[u]",
    "        remove u from Q",
    "        for each neighbor v of u do",
    "            alt = dist[u] + length(u, v)",
    "            if alt < dist[v] then",
    "                dist[v] = alt",
    "                prev[v] = u",
    "                update v's position in Q",
    "            end if",
    "        end for",
    "    end while",
    "    return dist, prev",
    "end procedure",
];

// ---------------------------------------------------------------------------
// Binary search trees
// ---------------------------------------------------------------------------

const TREE_INSERT: &[&str] = &[
    "procedure insert(root, value)",
    "    if root is null then",
    "        return new Node(value)",
    "    end if",
    "",
    "    if value < root.value then",
    "        root.left = insert(root.left, value)",
    "    else if value > root.value then",
    "        root.right = insert(root.right, value)",
    "    end if",
    "",
    "    return root",
    "end procedure",
];

const TREE_DELETE: &[&str] = &[
    "procedure delete(root, value)",
    "    if root is null then",
    "        return null",
    "    end if",
    "",
    "    if value < root.value then",
    "        root.left = delete(root.left, value)",
    "    else if value > root.value then",
    "        root.right = delete(root.right, value)",
    "    else",
    "        // Node with only one child or no child",
    "        if root.left is null then",
    "            return root.right",
    "        else if root.right is null then",
    "            return root.left",
    "        end if",
    "",
    "        // Node with two children",
    "        // Get the inorder successor (smallest in right subtree)",
    "        root.value = minValue(root.right)",
    "",
    "        // Delete the inorder successor",
    "        root.right = delete(root.right, root.value)",
    "    end if",
    "",
    "    return root",
    "end procedure",
    "",
    "procedure minValue(node)",
    "    current = node",
    "    while current.left is not null do",
    "        current = current.left",
    "    end while",
    "    return current.value",
    "end procedure",
];

const TREE_SEARCH: &[&str] = &[
    "procedure search(root, value)",
    "    if root is null or root.value = value then",
    "        return root",
    "    end if",
    "",
    "    if value < root.value then",
    "        return search(root.left, value)",
    "    else",
    "        return search(root.right, value)",
    "    end if",
    "end procedure",
];

const TREE_INORDER: &[&str] = &[
    "procedure inorderTraversal(root)",
    "    if root is not null then",
    "        inorderTraversal(root.left)",
    "        visit(root)",
    "        inorderTraversal(root.right)",
    "    end if",
    "end procedure",
];

const TREE_PREORDER: &[&str] = &[
    "procedure preorderTraversal(root)",
    "    if root is not null then",
    "        visit(root)",
    "        preorderTraversal(root.left)",
    "        preorderTraversal(root.right)",
    "    end if",
    "end procedure",
];

const TREE_POSTORDER: &[&str] = &[
    "procedure postorderTraversal(root)",
    "    if root is not null then",
    "        postorderTraversal(root.left)",
    "        postorderTraversal(root.right)",
    "        visit(root)",
    "    end if",
    "end procedure",
];

// ---------------------------------------------------------------------------
// Linked lists
// ---------------------------------------------------------------------------

const LIST_INSERT: &[&str] = &[
    "procedure insert(list, value, position)",
    "    node = new Node(value)",
    "    if position = 0 then",
    "        node.next = list.head",
    "        if list is doubly linked and list.head is not null then",
    "            list.head.prev = node",
    "        end if",
    "        list.head = node",
    "        return",
    "    end if",
    "",
    "    prev = list.head",
    "    for i = 1 to position - 1 do",
    "        prev = prev.next",
    "    end for",
    "    node.next = prev.next",
    "    if list is doubly linked then",
    "        node.prev = prev",
    "        if prev.next is not null then",
    "            prev.next.prev = node",
    "        end if",
    "    end if",
    "    prev.next = node",
    "end procedure",
];

const LIST_DELETE: &[&str] = &[
    "procedure delete(list, position)",
    "    if list.head is null then",
    "        return",
    "    end if",
    "",
    "    if position = 0 then",
    "        list.head = list.head.next",
    "        if list is doubly linked and list.head is not null then",
    "            list.head.prev = null",
    "        end if",
    "        return",
    "    end if",
    "",
    "    prev = list.head",
    "    for i = 1 to position - 1 do",
    "        prev = prev.next",
    "    end for",
    "    target = prev.next",
    "    prev.next = target.next",
    "    if list is doubly linked and target.next is not null then",
    "        target.next.prev = prev",
    "    end if",
    "end procedure",
];

const LIST_SEARCH: &[&str] = &[
    "procedure search(list, value)",
    "    current = list.head",
    "    position = 0",
    "    while current is not null do",
    "        if current.value = value then",
    "            return position",
    "        end if",
    "        current = current.next",
    "        position = position + 1",
    "    end while",
    "    return -1  // Value not found",
    "end procedure",
];

const LIST_TRAVERSE: &[&str] = &[
    "procedure traverse(list)",
    "    current = list.head",
    "    while current is not null do",
    "        visit(current)",
    "        current = current.next",
    "    end while",
    "end procedure",
];
